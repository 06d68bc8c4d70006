//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod dashboard;
pub mod export;
pub mod integrations;
pub mod onboard;
pub mod pricing;
pub mod widgets;

pub use audit::handle_audit_command;
pub use dashboard::{handle_customers_command, handle_dashboard_command, handle_profile_command};
pub use export::{handle_export_command, ExportCommands};
pub use integrations::{handle_integration_command, IntegrationCommands};
pub use onboard::{handle_onboard_command, handle_signup_command};
pub use pricing::{handle_pricing_command, PricingCommands};
pub use widgets::{handle_widget_command, WidgetCommands};
