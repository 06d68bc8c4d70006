//! Coming-soon pages for the research tools
//!
//! These pages only lead back to goal selection.

use std::io::{BufRead, Write};

use crate::error::AtlasResult;
use crate::onboarding::controller::ResearchTool;

use super::{StepContext, StepOutcome};

pub fn run<R: BufRead, W: Write>(
    ctx: &mut StepContext<'_, R, W>,
    tool: ResearchTool,
) -> AtlasResult<StepOutcome> {
    ctx.console.line("[Coming Soon]")?;
    ctx.console.heading(tool.title())?;
    ctx.console.line(tool.description())?;
    ctx.console.blank()?;

    for feature in tool.features() {
        ctx.console.line(format!("  * {}", feature))?;
    }

    ctx.console.blank()?;
    ctx.console.line("Excited for this feature?")?;
    ctx.console
        .line("This powerful tool is in development. Check back soon for updates!")?;
    ctx.console.blank()?;

    let index = ctx.console.prompt_choice(
        "What next",
        &["Choose Different Option", "Save and exit"],
        Some(0),
    )?;
    Ok(if index == 0 {
        StepOutcome::back()
    } else {
        StepOutcome::exit()
    })
}
