//! Dashboard, customers and profile commands

use crate::config::settings::Settings;
use crate::display::{format_customer_table, format_dashboard, format_profile};
use crate::error::AtlasResult;
use crate::services::dashboard::{search_customers, DashboardMode, SAMPLE_METRICS};
use crate::services::profile::ProfileService;
use crate::storage::Storage;

/// Handle `atlas dashboard`; the mode defaults to what the profile qualifies for
pub fn handle_dashboard_command(
    storage: &Storage,
    settings: &Settings,
    mode: Option<DashboardMode>,
) -> AtlasResult<()> {
    let profile = ProfileService::new(storage).require()?;
    let mode = mode.unwrap_or_else(|| DashboardMode::for_profile(&profile));

    print!(
        "{}",
        format_dashboard(&profile, mode, &SAMPLE_METRICS, &settings.currency_symbol)
    );
    Ok(())
}

/// Handle `atlas customers`
pub fn handle_customers_command(search: Option<String>) {
    let customers = search_customers(search.as_deref().unwrap_or(""));
    println!("{}", format_customer_table(&customers));
}

/// Handle `atlas profile`
pub fn handle_profile_command(storage: &Storage) -> AtlasResult<()> {
    let profile = ProfileService::new(storage).require()?;
    print!("{}", format_profile(&profile));
    Ok(())
}
