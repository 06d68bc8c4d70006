//! Integration and widget display formatting

use crate::models::UserProfile;
use crate::services::integration::StripeConnection;
use crate::services::widget::WidgetKind;

/// Status lines for `atlas integrations status`
pub fn format_integration_status(profile: &UserProfile) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{:<10} {}\n",
        "SDK",
        if profile.sdk_integrated {
            "Integrated"
        } else {
            "Not integrated (run 'atlas integrations sdk-test')"
        }
    ));
    output.push_str(&format!(
        "{:<10} {}\n",
        "Stripe",
        if profile.stripe_connected {
            "Connected"
        } else {
            "Not connected (run 'atlas integrations stripe-connect <KEY>')"
        }
    ));
    output
}

/// Summary printed after a successful Stripe connection
pub fn format_stripe_connection(connection: &StripeConnection) -> String {
    let mut output = String::new();
    output.push_str(&format!("Connected: {}\n", connection.account_label));

    output.push_str("\nWebhook events:\n");
    for event in &connection.webhook_events {
        output.push_str(&format!(
            "  {} {}\n",
            if event.active { "[x]" } else { "[ ]" },
            event.name
        ));
    }

    output.push_str("\nPayment methods:\n");
    for method in &connection.payment_methods {
        output.push_str(&format!(
            "  {} {}\n",
            if method.enabled { "[x]" } else { "[ ]" },
            method.name
        ));
    }

    output
}

/// Widget catalog for `atlas widgets list`
pub fn format_widget_list() -> String {
    let mut output = String::new();
    for kind in WidgetKind::ALL {
        output.push_str(&format!(
            "{:<16} {:<24} {}\n",
            kind.id(),
            kind.title(),
            kind.description()
        ));
    }
    output
}
