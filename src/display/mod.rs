//! Display formatting for terminal output
//!
//! Provides utilities for formatting plans, the profile, dashboards and
//! customers for terminal display.

pub mod customers;
pub mod dashboard;
pub mod integration;
pub mod plan;
pub mod profile;

pub use customers::format_customer_table;
pub use dashboard::{format_dashboard, format_dollars};
pub use integration::{format_integration_status, format_stripe_connection, format_widget_list};
pub use plan::{format_analytics, format_plan_details, format_plan_list, format_plan_preview};
pub use profile::format_profile;
