//! Connect Stripe step

use std::io::{BufRead, Write};

use crate::error::AtlasResult;
use crate::models::{ProfilePatch, UserProfile};
use crate::services::integration::connect_stripe;

use super::{StepContext, StepOutcome};

pub fn run<R: BufRead, W: Write>(
    ctx: &mut StepContext<'_, R, W>,
    profile: &UserProfile,
) -> AtlasResult<StepOutcome> {
    ctx.console.heading("Connect Stripe")?;
    ctx.console.line("Enable payments for your app")?;
    ctx.console.blank()?;
    if profile.stripe_connected {
        ctx.console.line("Stripe is already connected.")?;
        ctx.console.blank()?;
    }

    loop {
        let index = ctx.console.prompt_choice(
            "Select option",
            &["Connect Stripe", "Skip for now", "Back", "Save and exit"],
            Some(if profile.stripe_connected { 1 } else { 0 }),
        )?;

        match index {
            0 => {
                ctx.console
                    .line("Find your API keys in the Stripe Dashboard: https://dashboard.stripe.com/apikeys")?;
                let key = ctx.console.prompt_password("Stripe API key: ")?;
                let latency = ctx.settings.latency.stripe_connect();
                let connection = ctx.run_call("Connecting...", |scope| {
                    let token = scope.token();
                    async move { connect_stripe(&key, latency, &token).await }
                })?;

                if let Some(connection) = connection {
                    ctx.console.line(format!(
                        "Connected! {} is ready to accept payments.",
                        connection.account_label
                    ))?;
                    return Ok(StepOutcome::next_with(ProfilePatch::stripe_connected(true)));
                }
            }
            1 => return Ok(StepOutcome::next()),
            2 => return Ok(StepOutcome::back()),
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

    fn settings() -> Settings {
        Settings {
            latency: SimulatedLatency::instant(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_blank_key_is_rejected_then_connects() {
        let settings = settings();
        let mut console = scripted(&["1", "   ", "1", "sk_test_4242424242421234"]);
        let outcome = {
            let mut ctx = StepContext::new(&mut console, &settings);
            run(&mut ctx, &UserProfile::default()).unwrap()
        };

        assert_eq!(outcome.action, StepAction::Continue);
        assert_eq!(outcome.patch, ProfilePatch::stripe_connected(true));

        let out = output_of(console);
        assert!(out.contains("Error: Please enter your Stripe API key"));
        assert!(out.contains("Connected! Test account ending in 1234"));
    }

    #[test]
    fn test_skip_leaves_profile_alone() {
        let settings = settings();
        let mut console = scripted(&["2"]);
        let mut ctx = StepContext::new(&mut console, &settings);

        let outcome = run(&mut ctx, &UserProfile::default()).unwrap();
        assert_eq!(outcome.action, StepAction::Continue);
        assert!(outcome.patch.is_empty());
    }
}
