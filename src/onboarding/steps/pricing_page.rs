//! Pricing page step
//!
//! Previews the plans as the hosted page would show them and prints the
//! embed code.

use std::io::{BufRead, Write};

use crate::display::plan::format_plan_preview;
use crate::error::AtlasResult;
use crate::models::plan::fallback_pricing_page_plan;
use crate::models::UserProfile;
use crate::services::integration::pause;
use crate::services::widget::pricing_page_embed;

use super::{StepContext, StepOutcome};

pub fn run<R: BufRead, W: Write>(
    ctx: &mut StepContext<'_, R, W>,
    profile: &UserProfile,
) -> AtlasResult<StepOutcome> {
    ctx.console.heading("Set Up Your Pricing Page")?;
    ctx.console.line("Embed this in your app")?;
    ctx.console.blank()?;

    let preview = match profile.plans() {
        [] => format_plan_preview(&[fallback_pricing_page_plan()], ctx.currency()),
        plans => format_plan_preview(plans, ctx.currency()),
    };
    ctx.console.line("Preview")?;
    ctx.console.line("-------")?;
    ctx.console.line(preview)?;

    ctx.console.line("Code Snippet")?;
    ctx.console.line("------------")?;
    ctx.console.line(pricing_page_embed(profile))?;
    ctx.console.blank()?;

    loop {
        let index = ctx.console.prompt_choice(
            "Select option",
            &["Save and Continue", "Back", "Save and exit"],
            Some(0),
        )?;

        match index {
            0 => {
                let latency = ctx.settings.latency.pricing_page();
                let saved = ctx.run_call("Saving...", |scope| {
                    let token = scope.token();
                    async move { pause(latency, &token).await }
                })?;
                if saved.is_some() {
                    return Ok(StepOutcome::next());
                }
                ctx.console.line("Failed to save pricing page configuration")?;
            }
            1 => return Ok(StepOutcome::back()),
            _ => return Ok(StepOutcome::exit()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{Settings, SimulatedLatency};
    use crate::onboarding::prompt::tests::{output_of, scripted};
    use crate::onboarding::steps::StepAction;

    #[test]
    fn test_falls_back_to_basic_plan() {
        let settings = Settings {
            latency: SimulatedLatency::instant(),
            ..Settings::default()
        };
        let profile = UserProfile::sign_up("ada@example.com", "hunter22!");
        let mut console = scripted(&[""]);
        let outcome = {
            let mut ctx = StepContext::new(&mut console, &settings);
            run(&mut ctx, &profile).unwrap()
        };

        assert_eq!(outcome.action, StepAction::Continue);
        let out = output_of(console);
        assert!(out.contains("Basic Plan - $29/mo"));
        assert!(out.contains("    - Users: 100"));
        assert!(out.contains(&format!("merchantId=\"{}\"", profile.merchant_id)));
    }
}
