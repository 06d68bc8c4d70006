//! Goal selection step

use std::io::{BufRead, Write};

use crate::error::AtlasResult;
use crate::models::{UserProfile, GOAL_CATALOG};

use super::{StepContext, StepOutcome};

pub fn run<R: BufRead, W: Write>(
    ctx: &mut StepContext<'_, R, W>,
    profile: &UserProfile,
) -> AtlasResult<StepOutcome> {
    ctx.console.heading("What would you like to achieve?")?;
    ctx.console
        .line("Let's get started. Pick the goal that matters most right now.")?;
    ctx.console.blank()?;

    let mut options: Vec<String> = GOAL_CATALOG
        .iter()
        .map(|info| format!("{} [{}]\n     {}", info.title, info.category, info.description))
        .collect();
    options.push("Save and exit".to_string());
    let labels: Vec<&str> = options.iter().map(String::as_str).collect();

    let default = profile
        .selected_goal
        .as_ref()
        .and_then(|goal| GOAL_CATALOG.iter().position(|info| info.goal == *goal));

    let index = ctx.console.prompt_choice("Select a goal", &labels, default)?;
    Ok(match GOAL_CATALOG.get(index) {
        Some(info) => StepOutcome::goal(info.goal.clone()),
        None => StepOutcome::exit(),
    })
}
