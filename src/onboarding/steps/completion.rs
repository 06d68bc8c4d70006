//! Completion summary
//!
//! Read-only: the terminal step offers no further transitions.

use std::io::{BufRead, Write};

use crate::error::AtlasResult;
use crate::models::UserProfile;

use super::StepContext;

fn status(done: bool, yes: &str, no: &str) -> String {
    if done {
        format!("[x] {}", yes)
    } else {
        format!("[ ] {}", no)
    }
}

pub fn run<R: BufRead, W: Write>(
    ctx: &mut StepContext<'_, R, W>,
    profile: &UserProfile,
) -> AtlasResult<()> {
    ctx.console.heading("You're Ready!")?;
    ctx.console.line("Your app is monetized with Atlas")?;
    ctx.console.blank()?;
    ctx.console.line("Setup Summary")?;
    ctx.console.line("-------------")?;
    ctx.console.line(format!("[x] Account Created: {}", profile.email))?;
    ctx.console
        .line(format!("    Merchant ID: {}", profile.merchant_id))?;

    match &profile.pricing_model {
        Some(model) => {
            let names: Vec<&str> = model.plans.iter().map(|p| p.name.as_str()).collect();
            ctx.console
                .line(format!("[x] Pricing Plan Created ({})", model.model_type))?;
            ctx.console.line(format!("    Plans: {}", names.join(", ")))?;
        }
        None => ctx.console.line("[ ] Pricing not configured yet")?,
    }

    ctx.console.line(status(
        profile.sdk_integrated,
        "SDK Integration: Atlas SDK connected and verified",
        "SDK Integration: not verified yet",
    ))?;
    ctx.console.line(status(
        profile.stripe_connected,
        "Stripe Connected: Ready to accept payments",
        "Stripe: not connected yet",
    ))?;
    ctx.console.blank()?;
    ctx.console.line("Next steps:")?;
    ctx.console
        .line("  - Run 'atlas dashboard' to see your account")?;
    ctx.console.line("  - Run 'atlas tui' to open the interactive interface")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::Settings;
    use crate::models::{default_plans, PricingModel, PricingModelType, ProfilePatch};
    use crate::onboarding::prompt::tests::{output_of, scripted};

    #[test]
    fn test_summary_lists_plans_and_status() {
        let settings = Settings::default();
        let profile = UserProfile::sign_up("ada@example.com", "hunter22!")
            .merged(&ProfilePatch::pricing_model(PricingModel::new(
                PricingModelType::Imported,
                default_plans(),
            )))
            .merged(&ProfilePatch::sdk_integrated(true));

        let mut console = scripted(&[]);
        {
            let mut ctx = StepContext::new(&mut console, &settings);
            run(&mut ctx, &profile).unwrap();
        }

        let out = output_of(console);
        assert!(out.contains("[x] Account Created: ada@example.com"));
        assert!(out.contains("[x] Pricing Plan Created (imported)"));
        assert!(out.contains("Plans: Basic, Pro, Enterprise"));
        assert!(out.contains("[x] SDK Integration"));
        assert!(out.contains("[ ] Stripe: not connected yet"));
    }
}
