//! Onboarding wizard steps
//!
//! Each step renders itself, reads answers and returns a [`StepOutcome`]:
//! the profile change it wants plus where the wizard should go next. Steps
//! never write the profile themselves; the runner merges and persists.

pub mod coming_soon;
pub mod completion;
pub mod goals;
pub mod pricing;
pub mod pricing_page;
pub mod sdk;
pub mod signup;
pub mod stripe;

use std::future::Future;
use std::io::{BufRead, Write};

use crate::config::settings::Settings;
use crate::error::{AtlasError, AtlasResult};
use crate::models::{Goal, ProfilePatch};
use crate::services::integration::{block_on_call, CallOutcome, CallScope};

use super::prompt::Console;

/// Where the wizard goes after a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    Continue,
    ContinueWithGoal(Goal),
    Back,
    /// Stop here; progress is already saved
    Exit,
}

/// What a step produced
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub patch: ProfilePatch,
    pub action: StepAction,
}

impl StepOutcome {
    pub fn next() -> Self {
        Self::next_with(ProfilePatch::new())
    }

    pub fn next_with(patch: ProfilePatch) -> Self {
        Self {
            patch,
            action: StepAction::Continue,
        }
    }

    pub fn goal(goal: Goal) -> Self {
        Self {
            patch: ProfilePatch::new(),
            action: StepAction::ContinueWithGoal(goal),
        }
    }

    pub fn back() -> Self {
        Self {
            patch: ProfilePatch::new(),
            action: StepAction::Back,
        }
    }

    pub fn exit() -> Self {
        Self {
            patch: ProfilePatch::new(),
            action: StepAction::Exit,
        }
    }
}

/// What every step gets to work with
pub struct StepContext<'a, R, W> {
    pub console: &'a mut Console<R, W>,
    pub settings: &'a Settings,
}

impl<'a, R: BufRead, W: Write> StepContext<'a, R, W> {
    pub fn new(console: &'a mut Console<R, W>, settings: &'a Settings) -> Self {
        Self { console, settings }
    }

    pub fn currency(&self) -> &str {
        &self.settings.currency_symbol
    }

    /// Print an error inline, the way a form shows it under its fields
    pub fn show_error(&mut self, err: &AtlasError) -> AtlasResult<()> {
        self.console.line(format!("Error: {}", inline_message(err)))
    }

    /// Run a simulated call with a "working" line, reporting failures inline
    ///
    /// Returns `None` when the call failed or was cancelled; the step stays
    /// where it is in that case.
    pub fn run_call<T, F, C>(&mut self, working: &str, call: C) -> AtlasResult<Option<T>>
    where
        C: FnOnce(&CallScope) -> F,
        F: Future<Output = CallOutcome<T>>,
    {
        self.console.line(working)?;
        let scope = CallScope::new();
        let outcome = block_on_call(&scope, call(&scope))?;

        match outcome {
            CallOutcome::Success(value) => Ok(Some(value)),
            CallOutcome::Failure(reason) => {
                self.console.line(format!("Error: {}", reason))?;
                Ok(None)
            }
            CallOutcome::Cancelled => {
                self.console.line("Cancelled.")?;
                Ok(None)
            }
        }
    }
}

/// The message of an error without its category prefix
pub fn inline_message(err: &AtlasError) -> String {
    match err {
        AtlasError::Validation(message) | AtlasError::Integration(message) => message.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_message_strips_category() {
        let err = AtlasError::Validation("Please fill in all fields".into());
        assert_eq!(inline_message(&err), "Please fill in all fields");

        let err = AtlasError::Cancelled("input closed".into());
        assert_eq!(inline_message(&err), "Operation cancelled: input closed");
    }
}
