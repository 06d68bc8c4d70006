//! Dashboard display formatting
//!
//! Renders the development (onboarding checklist) and production (metrics and
//! activity) dashboards as plain text.

use crate::models::UserProfile;
use crate::services::dashboard::{
    checklist, checklist_progress, next_steps, recent_activity, DashboardMode, Metrics,
};

/// Format a whole-dollar amount with thousands separators
pub fn format_dollars(amount: u64, currency: &str) -> String {
    let digits = amount.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{}{}", currency, grouped)
}

fn format_metrics(metrics: &Metrics, currency: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{:<18} {:>12}  +{:.1}%\n",
        "Monthly Revenue",
        format_dollars(metrics.mrr, currency),
        metrics.mrr_growth
    ));
    output.push_str(&format!(
        "{:<18} {:>12}  +{:.1}%\n",
        "Annual Revenue",
        format_dollars(metrics.arr, currency),
        metrics.arr_growth
    ));
    output.push_str(&format!(
        "{:<18} {:>12}  +{:.1}%\n",
        "Customers", metrics.customers, metrics.customer_growth
    ));
    output
}

fn format_activity(currency: &str) -> String {
    let mut output = String::new();
    for item in recent_activity() {
        let amount = item
            .amount
            .map(|a| format_dollars(u64::from(a), currency))
            .unwrap_or_default();
        output.push_str(&format!(
            "{:<14} {:<16} {:<34} {:>6}  {}\n",
            item.kind.to_string(),
            item.customer,
            item.description,
            amount,
            item.when
        ));
    }
    output
}

/// Format the dashboard for the given mode
pub fn format_dashboard(
    profile: &UserProfile,
    mode: DashboardMode,
    metrics: &Metrics,
    currency: &str,
) -> String {
    let mut output = String::new();
    output.push_str(&format!("Dashboard ({})\n", mode));
    output.push_str(&format!("Merchant ID: {}\n\n", profile.merchant_id));

    match mode {
        DashboardMode::Development => {
            let items = checklist(profile);
            output.push_str(&format!(
                "Onboarding Progress: {}%\n",
                checklist_progress(&items)
            ));
            for item in &items {
                output.push_str(&format!(
                    "  {} {}\n",
                    if item.completed { "[x]" } else { "[ ]" },
                    item.name
                ));
            }

            output.push_str("\nNext Steps:\n");
            for (label, command) in next_steps(profile) {
                output.push_str(&format!("  - {:<30} {}\n", label, command));
            }
        }
        DashboardMode::Production => {
            output.push_str(&format_metrics(metrics, currency));
            output.push_str("\nRecent Activity:\n");
            output.push_str(&format_activity(currency));
        }
    }

    output
}
