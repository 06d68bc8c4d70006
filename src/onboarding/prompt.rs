//! Line-oriented terminal prompts
//!
//! The wizard reads answers one line at a time. Input and output are
//! generic so scripted runs and tests can drive every step.

use std::fmt::Display;
use std::io::{self, BufRead, IsTerminal, Stdin, StdinLock, Stdout, Write};

use crate::error::{AtlasError, AtlasResult};

/// Reader and writer pair the wizard talks through
pub struct Console<R, W> {
    input: R,
    output: W,
    interactive: bool,
}

impl Console<StdinLock<'static>, Stdout> {
    /// Console on the process's stdin and stdout
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        let interactive = stdin.is_terminal();
        Self {
            input: stdin.lock(),
            output: io::stdout(),
            interactive,
        }
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Console over arbitrary streams; never treated as a terminal
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            interactive: false,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Write one line
    pub fn line(&mut self, text: impl Display) -> AtlasResult<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    pub fn blank(&mut self) -> AtlasResult<()> {
        writeln!(self.output)?;
        Ok(())
    }

    /// A title underlined to its width
    pub fn heading(&mut self, title: &str) -> AtlasResult<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", title)?;
        writeln!(self.output, "{}", "=".repeat(title.chars().count()))?;
        writeln!(self.output)?;
        Ok(())
    }

    /// Clear the terminal so each step starts at the top
    pub fn clear_screen(&mut self) -> AtlasResult<()> {
        if self.interactive {
            write!(self.output, "\x1B[2J\x1B[H")?;
            self.output.flush()?;
        }
        Ok(())
    }

    /// Read one trimmed line; closed input cancels the wizard
    pub fn prompt_string(&mut self, prompt: &str) -> AtlasResult<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut input = String::new();
        if self.input.read_line(&mut input)? == 0 {
            writeln!(self.output)?;
            return Err(AtlasError::Cancelled("input closed".into()));
        }

        Ok(input.trim().to_string())
    }

    /// Read a password without echo when attached to a terminal
    pub fn prompt_password(&mut self, prompt: &str) -> AtlasResult<String> {
        if self.interactive {
            self.output.flush()?;
            return rpassword::prompt_password(prompt)
                .map_err(|e| AtlasError::Io(format!("Failed to read password: {}", e)));
        }
        self.prompt_string(prompt)
    }

    /// Show numbered options and read a choice, re-asking until valid
    ///
    /// An empty answer picks `default` when there is one. Returns the
    /// 0-based index.
    pub fn prompt_choice(
        &mut self,
        prompt: &str,
        options: &[&str],
        default: Option<usize>,
    ) -> AtlasResult<usize> {
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}. {}", i + 1, option)?;
        }
        writeln!(self.output)?;

        let prompt = match default {
            Some(d) => format!("{} [{}]: ", prompt, d + 1),
            None => format!("{}: ", prompt),
        };

        loop {
            let answer = self.prompt_string(&prompt)?;
            if answer.is_empty() {
                if let Some(d) = default {
                    return Ok(d);
                }
            }
            match answer.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(n - 1),
                _ => writeln!(
                    self.output,
                    "Please enter a number between 1 and {}.",
                    options.len()
                )?,
            }
        }
    }

    /// Yes/no question; an empty answer takes `default`
    pub fn confirm(&mut self, prompt: &str, default: bool) -> AtlasResult<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            let answer = self.prompt_string(&format!("{} {} ", prompt, hint))?;
            match answer.to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "Please answer yes or no.")?,
            }
        }
    }
}
