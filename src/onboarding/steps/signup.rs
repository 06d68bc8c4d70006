//! Sign-up step
//!
//! Collects email and password, re-asking on validation errors, then
//! creates the profile after the simulated account creation.

use std::io::{BufRead, Write};

use crate::error::AtlasResult;
use crate::models::UserProfile;
use crate::services::integration::pause;
use crate::services::profile::{validate_sign_up, ProfileService};
use crate::storage::Storage;

use super::StepContext;

/// Run sign-up until an account is created
pub fn run<R: BufRead, W: Write>(
    ctx: &mut StepContext<'_, R, W>,
    storage: &Storage,
) -> AtlasResult<UserProfile> {
    ctx.console.heading("Atlas: Turn your app into a business")?;
    ctx.console.line("Create your account")?;
    ctx.console.blank()?;

    loop {
        let email = ctx.console.prompt_string("Email: ")?;
        let password = ctx.console.prompt_password("Password: ")?;

        if let Err(e) = validate_sign_up(&email, &password) {
            ctx.show_error(&e)?;
            ctx.console.blank()?;
            continue;
        }

        let latency = ctx.settings.latency.signup();
        let created = ctx.run_call("Creating Account...", |scope| {
            let token = scope.token();
            async move { pause(latency, &token).await }
        })?;
        if created.is_none() {
            continue;
        }

        let profile = ProfileService::new(storage).sign_up(&email, &password)?;
        ctx.console.line(format!(
            "Account created for {}. Merchant ID: {}",
            profile.email, profile.merchant_id
        ))?;
        return Ok(profile);
    }
}
