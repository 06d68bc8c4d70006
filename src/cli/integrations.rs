//! Integration CLI commands
//!
//! Stripe and SDK status for the integrations route. Both connections are
//! simulated; see [`crate::services::integration`].

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::integration::{format_integration_status, format_stripe_connection};
use crate::error::AtlasResult;
use crate::services::integration::{
    block_on_call, connect_stripe, test_sdk, CallScope, IntegrationService,
};
use crate::services::profile::ProfileService;
use crate::storage::Storage;

/// Integration subcommands
#[derive(Subcommand)]
pub enum IntegrationCommands {
    /// Show SDK and Stripe status
    Status,
    /// Connect a Stripe account
    StripeConnect {
        /// Stripe secret key (sk_test_... or sk_live_...)
        key: String,
    },
    /// Disconnect the Stripe account
    StripeDisconnect,
    /// Verify the SDK installation
    SdkTest,
}

/// Handle an integration command
pub fn handle_integration_command(
    storage: &Storage,
    settings: &Settings,
    cmd: IntegrationCommands,
) -> AtlasResult<()> {
    let profile = ProfileService::new(storage).require()?;
    let service = IntegrationService::new(storage);

    match cmd {
        IntegrationCommands::Status => {
            print!("{}", format_integration_status(&profile));
        }

        IntegrationCommands::StripeConnect { key } => {
            println!("Connecting to Stripe...");
            let scope = CallScope::new();
            let token = scope.token();
            let connection = block_on_call(
                &scope,
                connect_stripe(&key, settings.latency.stripe_connect(), &token),
            )?
            .into_result("Stripe connection")?;

            service.mark_stripe_connected()?;
            print!("{}", format_stripe_connection(&connection));
        }

        IntegrationCommands::StripeDisconnect => {
            if !profile.stripe_connected {
                println!("Stripe is not connected.");
            } else {
                service.disconnect_stripe()?;
                println!("Stripe disconnected.");
            }
        }

        IntegrationCommands::SdkTest => {
            println!("Testing SDK installation...");
            let scope = CallScope::new();
            let token = scope.token();
            block_on_call(
                &scope,
                test_sdk(&profile.merchant_id, settings.latency.sdk_test(), &token),
            )?
            .into_result("SDK test")?;

            service.mark_sdk_integrated()?;
            println!("SDK verified for {}", profile.merchant_id);
        }
    }

    Ok(())
}
