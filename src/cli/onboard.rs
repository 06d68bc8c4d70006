//! Sign-up and onboarding commands

use tracing::info;

use crate::config::{paths::AtlasPaths, settings::Settings};
use crate::error::AtlasResult;
use crate::onboarding::{Console, OnboardingWizard};
use crate::services::integration::{block_on_call, pause, CallScope};
use crate::services::profile::{validate_sign_up, ProfileService};
use crate::storage::Storage;

/// Handle `atlas signup`
///
/// With both `email` and `password` the account is created without prompting.
pub fn handle_signup_command(
    storage: &Storage,
    paths: &AtlasPaths,
    settings: &Settings,
    email: Option<String>,
    password: Option<String>,
) -> AtlasResult<()> {
    match (email, password) {
        (Some(email), Some(password)) => {
            validate_sign_up(&email, &password)?;

            println!("Creating Account...");
            let scope = CallScope::new();
            let token = scope.token();
            block_on_call(&scope, pause(settings.latency.signup(), &token))?
                .into_result("sign-up")?;

            let profile = ProfileService::new(storage).sign_up(&email, &password)?;
            println!("Account created for {}", profile.email);
            println!("Merchant ID: {}", profile.merchant_id);
        }
        _ => {
            let mut console = Console::stdio();
            OnboardingWizard::new(storage, paths).sign_up(&mut console, settings)?;
        }
    }

    println!();
    println!("Run 'atlas onboard' to set up your pricing and integrations.");
    Ok(())
}

/// Handle `atlas onboard`
pub fn handle_onboard_command(
    storage: &Storage,
    paths: &AtlasPaths,
    settings: &mut Settings,
) -> AtlasResult<()> {
    let mut console = Console::stdio();
    let result = OnboardingWizard::new(storage, paths).run(&mut console, settings)?;

    info!(completed = result.completed, "onboarding session ended");
    if result.completed {
        println!();
        println!("Run 'atlas dashboard' to see your business at a glance.");
    }
    Ok(())
}
