//! Plan display formatting
//!
//! Formats pricing plans for terminal output in table and detail views.

use crate::models::Plan;
use crate::services::pricing::PricingAnalytics;

/// Format plans as a numbered table
pub fn format_plan_list(plans: &[Plan], currency: &str) -> String {
    if plans.is_empty() {
        return "No plans configured.".to_string();
    }

    let name_width = plans
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let prices: Vec<String> = plans.iter().map(|p| p.price_label(currency)).collect();
    let price_width = prices.iter().map(|p| p.len()).max().unwrap_or(5).max(5);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>3}  {:<name_width$}  {:<6}  {:<price_width$}  {:>8}  {:<8}  {}\n",
        "#",
        "Name",
        "Type",
        "Price",
        "Features",
        "Trial",
        "Default",
        name_width = name_width,
        price_width = price_width,
    ));
    output.push_str(&format!(
        "{:->3}  {:-<name_width$}  {:-<6}  {:-<price_width$}  {:->8}  {:-<8}  {:-<7}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
        price_width = price_width,
    ));

    for (i, (plan, price)) in plans.iter().zip(&prices).enumerate() {
        let trial = if plan.trial_available {
            format!("{} days", plan.trial_days)
        } else {
            "-".to_string()
        };

        output.push_str(&format!(
            "{:>3}  {:<name_width$}  {:<6}  {:<price_width$}  {:>8}  {:<8}  {}\n",
            i + 1,
            plan.name,
            plan.plan_type.to_string(),
            price,
            plan.features.len(),
            trial,
            if plan.default_on_cancel { "yes" } else { "" },
            name_width = name_width,
            price_width = price_width,
        ));
    }

    output
}

/// Format a single plan with its features
pub fn format_plan_details(plan: &Plan, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Plan: {}\n", plan.name));
    output.push_str(&format!("  Type:              {}\n", plan.plan_type));
    output.push_str(&format!("  Price:             {}\n", plan.price_label(currency)));
    output.push_str(&format!(
        "  Trial:             {}\n",
        if plan.trial_available {
            format!("{} days", plan.trial_days)
        } else {
            "No".to_string()
        }
    ));
    output.push_str(&format!(
        "  Default on cancel: {}\n",
        if plan.default_on_cancel { "Yes" } else { "No" }
    ));

    if plan.features.is_empty() {
        output.push_str("  Features:          (none)\n");
    } else {
        output.push_str("  Features:\n");
        for (i, feature) in plan.features.iter().enumerate() {
            output.push_str(&format!(
                "    {:>2}. {:<24} {}\n",
                i + 1,
                feature.name,
                feature.limit_value().unwrap_or("included")
            ));
        }
    }

    output
}

/// Compact preview used by the wizard: one line per plan plus features
pub fn format_plan_preview(plans: &[Plan], currency: &str) -> String {
    let mut output = String::new();
    for plan in plans {
        output.push_str(&format!("{} - {}", plan.name, plan.price_label(currency)));
        if plan.trial_available {
            output.push_str(&format!(" ({}-day trial)", plan.trial_days));
        }
        output.push('\n');
        for feature in &plan.features {
            output.push_str(&format!("    - {}\n", feature));
        }
    }
    output
}

/// Format derived pricing analytics
pub fn format_analytics(analytics: &PricingAnalytics, currency: &str) -> String {
    let name_width = analytics
        .plans
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>9}  {:>6}  {:>6}  {:>12}\n",
        "Plan",
        "Customers",
        "Share",
        "Churn",
        "Revenue/mo",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->9}  {:->6}  {:->6}  {:->12}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for plan in &analytics.plans {
        output.push_str(&format!(
            "{:<name_width$}  {:>9}  {:>5.1}%  {:>6}  {:>12}\n",
            plan.name,
            plan.customers,
            plan.share,
            plan.churn_rate
                .map(|c| format!("{:.1}%", c))
                .unwrap_or_else(|| "-".to_string()),
            plan.monthly_revenue
                .map(|r| format!("{}{:.2}", currency, r))
                .unwrap_or_else(|| "-".to_string()),
            name_width = name_width,
        ));
    }

    output.push('\n');
    output.push_str(&format!("Total customers: {}\n", analytics.total_customers));
    output.push_str(&format!("Total MRR:       {}{:.2}\n", currency, analytics.total_mrr));

    if !analytics.conversions.is_empty() {
        output.push_str("\nConversions:\n");
        for conversion in &analytics.conversions {
            output.push_str(&format!(
                "  {} -> {}: {:.1}%\n",
                conversion.from, conversion.to, conversion.rate
            ));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_plans;
    use crate::services::pricing::analytics;

    #[test]
    fn test_plan_list() {
        let output = format_plan_list(&default_plans(), "$");
        assert!(output.contains("Basic"));
        assert!(output.contains("$79/mo"));
        assert!(output.contains("Contact sales"));
        assert!(output.contains("14 days"));
        assert_eq!(output.lines().count(), 5);
    }

    #[test]
    fn test_empty_plan_list() {
        assert_eq!(format_plan_list(&[], "$"), "No plans configured.");
    }

    #[test]
    fn test_plan_details() {
        let plans = default_plans();
        let output = format_plan_details(&plans[0], "$");
        assert!(output.contains("Plan: Basic"));
        assert!(output.contains("Default on cancel: Yes"));
        assert!(output.contains("Users"));
        assert!(output.contains("included"));
    }

    #[test]
    fn test_analytics_totals() {
        let output = format_analytics(&analytics(&default_plans()), "$");
        assert!(output.contains("Total customers: 65"));
        assert!(output.contains("Total MRR:       $3555.00"));
        assert!(output.contains("Basic -> Pro: 8.5%"));
    }
}
