//! SDK integration step

use std::io::{BufRead, Write};

use crate::error::AtlasResult;
use crate::models::{ProfilePatch, UserProfile};
use crate::services::integration::{sdk_snippet, test_sdk, SDK_INSTALL_COMMAND};

use super::{StepContext, StepOutcome};

pub fn run<R: BufRead, W: Write>(
    ctx: &mut StepContext<'_, R, W>,
    profile: &UserProfile,
) -> AtlasResult<StepOutcome> {
    ctx.console.heading("Integrate Atlas SDK")?;
    ctx.console.line("Add monetization to your app")?;
    ctx.console.blank()?;
    ctx.console.line("Step 1: Install Atlas SDK")?;
    ctx.console.line(format!("    {}", SDK_INSTALL_COMMAND))?;
    ctx.console.blank()?;
    ctx.console.line("Step 2: Add Rules to Cursor")?;
    for line in sdk_snippet(profile).lines() {
        ctx.console.line(format!("    {}", line))?;
    }
    ctx.console.blank()?;
    ctx.console.line("Step 3: Verify Integration")?;
    if profile.sdk_integrated {
        ctx.console.line("The SDK is already verified.")?;
    }
    ctx.console.blank()?;

    loop {
        let index = ctx.console.prompt_choice(
            "Select option",
            &["Test SDK", "Skip for now", "Back", "Save and exit"],
            Some(if profile.sdk_integrated { 1 } else { 0 }),
        )?;

        match index {
            0 => {
                let latency = ctx.settings.latency.sdk_test();
                let merchant_id = profile.merchant_id.clone();
                let verified = ctx.run_call("Testing...", |scope| {
                    let token = scope.token();
                    async move { test_sdk(&merchant_id, latency, &token).await }
                })?;

                if verified.is_some() {
                    ctx.console
                        .line("Success! Your SDK integration is working correctly.")?;
                    return Ok(StepOutcome::next_with(ProfilePatch::sdk_integrated(true)));
                }
                ctx.console.line("Integration Error: please check your setup and try again.")?;
            }
            1 => {
                if !profile.sdk_integrated {
                    ctx.console
                        .line("Step skipped. You can always integrate the SDK later from your dashboard.")?;
                }
                return Ok(StepOutcome::next());
            }
            2 => return Ok(StepOutcome::back()),
            _ => return Ok(StepOutcome::exit()),
        }
    }
}
