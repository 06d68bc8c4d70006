//! Profile display formatting

use crate::models::UserProfile;

fn check(done: bool) -> &'static str {
    if done {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Format the stored profile for `atlas profile`
pub fn format_profile(profile: &UserProfile) -> String {
    let mut output = String::new();

    output.push_str(&format!("Email:        {}\n", profile.email));
    output.push_str(&format!("Merchant ID:  {}\n", profile.merchant_id));

    let goal = profile
        .selected_goal
        .as_ref()
        .map(|g| format!("{} ({})", g, g.id()))
        .unwrap_or_else(|| "-".to_string());
    output.push_str(&format!("Goal:         {}\n", goal));

    match &profile.pricing_model {
        Some(model) => {
            let names: Vec<&str> = model.plans.iter().map(|p| p.name.as_str()).collect();
            output.push_str(&format!(
                "Pricing:      {} ({} plans: {})\n",
                model.model_type,
                model.plans.len(),
                names.join(", ")
            ));
        }
        None => output.push_str("Pricing:      not configured\n"),
    }

    output.push_str(&format!(
        "SDK:          {} {}\n",
        check(profile.sdk_integrated),
        if profile.sdk_integrated {
            "integrated"
        } else {
            "not integrated"
        }
    ));
    output.push_str(&format!(
        "Stripe:       {} {}\n",
        check(profile.stripe_connected),
        if profile.stripe_connected {
            "connected"
        } else {
            "not connected"
        }
    ));

    if !profile.extra.is_empty() {
        let keys: Vec<&str> = profile.extra.keys().map(String::as_str).collect();
        output.push_str(&format!("Other keys:   {}\n", keys.join(", ")));
    }

    output
}
