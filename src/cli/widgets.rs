//! Widget CLI commands

use clap::Subcommand;

use crate::display::integration::format_widget_list;
use crate::services::widget::{ai_prompt, snippet, Appearance, WidgetKind};

/// Widget subcommands
#[derive(Subcommand)]
pub enum WidgetCommands {
    /// List available widgets
    List,
    /// Print the embed snippet for a widget
    Snippet {
        /// Widget to embed
        #[arg(value_enum)]
        widget: WidgetKind,
        /// Primary color (hex)
        #[arg(long)]
        color: Option<String>,
        /// Font family
        #[arg(long)]
        font: Option<String>,
        /// Border radius in pixels
        #[arg(long)]
        radius: Option<u32>,
        /// Hide the Atlas logo
        #[arg(long)]
        hide_logo: bool,
        /// Print an AI-assistant prompt instead of the snippet
        #[arg(long)]
        prompt: bool,
    },
}

/// Handle a widget command
pub fn handle_widget_command(cmd: WidgetCommands) {
    match cmd {
        WidgetCommands::List => print!("{}", format_widget_list()),

        WidgetCommands::Snippet {
            widget,
            color,
            font,
            radius,
            hide_logo,
            prompt,
        } => {
            let defaults = Appearance::default();
            let appearance = Appearance {
                primary_color: color.unwrap_or(defaults.primary_color),
                font_family: font.unwrap_or(defaults.font_family),
                border_radius: radius.unwrap_or(defaults.border_radius),
                show_logo: !hide_logo,
            };

            if prompt {
                println!("{}", ai_prompt(widget, &appearance));
            } else {
                println!("{}", snippet(widget, &appearance));
            }
        }
    }
}
