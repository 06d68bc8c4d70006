//! Embeddable widgets
//!
//! Builds the script snippets and AI-assistant prompts for the pricing page
//! and customer portal widgets, plus the React embed shown on the pricing
//! page step.

use std::fmt;

use crate::models::UserProfile;

/// A widget the merchant can embed
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum WidgetKind {
    PricingPage,
    CustomerPortal,
}

impl WidgetKind {
    pub const ALL: [WidgetKind; 2] = [WidgetKind::PricingPage, WidgetKind::CustomerPortal];

    pub fn id(&self) -> &'static str {
        match self {
            Self::PricingPage => "pricing-page",
            Self::CustomerPortal => "customer-portal",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::PricingPage => "Pricing Widget",
            Self::CustomerPortal => "Customer Portal Widget",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::PricingPage => "Drop-in pricing table that stays in sync with your plans",
            Self::CustomerPortal => "Self-service plan changes, invoices and cancellation",
        }
    }

    fn container_id(&self) -> &'static str {
        match self {
            Self::PricingPage => "atlas-pricing-widget",
            Self::CustomerPortal => "atlas-customer-portal",
        }
    }

    fn script_name(&self) -> &'static str {
        match self {
            Self::PricingPage => "pricing.js",
            Self::CustomerPortal => "customer-portal.js",
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Widget styling options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appearance {
    pub primary_color: String,
    pub font_family: String,
    pub border_radius: u32,
    pub show_logo: bool,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            primary_color: "#9b87f5".to_string(),
            font_family: "Inter".to_string(),
            border_radius: 8,
            show_logo: true,
        }
    }
}

/// Script tag snippet that loads a widget with the given styling
pub fn snippet(kind: WidgetKind, appearance: &Appearance) -> String {
    format!(
        r#"<div id="{container}"></div>
<script>
  (function() {{
    var script = document.createElement('script');
    script.src = 'https://cdn.atlas.com/widgets/{script}';
    script.async = true;
    document.body.appendChild(script);

    window.atlasConfig = {{
      apiKey: "your-api-key",
      primaryColor: "{color}",
      fontFamily: "{font}",
      borderRadius: {radius},
      showLogo: {logo},
    }};
  }})();
</script>"#,
        container = kind.container_id(),
        script = kind.script_name(),
        color = appearance.primary_color,
        font = appearance.font_family,
        radius = appearance.border_radius,
        logo = appearance.show_logo,
    )
}

/// Instructions to paste into an AI coding assistant
pub fn ai_prompt(kind: WidgetKind, appearance: &Appearance) -> String {
    let name = match kind {
        WidgetKind::PricingPage => "Atlas Pricing Widget",
        WidgetKind::CustomerPortal => "Atlas Customer Portal Widget",
    };
    let logo = if appearance.show_logo {
        "Show Atlas logo"
    } else {
        "Hide Atlas logo"
    };

    format!(
        "Add the {name} to my website with these settings:\n\
         - Primary color: {}\n\
         - Font family: {}\n\
         - Border radius: {}px\n\
         - {logo}\n\
         \n\
         Please set up all the necessary script tags and configuration.",
        appearance.primary_color, appearance.font_family, appearance.border_radius,
    )
}

/// React embed for the hosted pricing page
pub fn pricing_page_embed(profile: &UserProfile) -> String {
    let merchant_id = if profile.merchant_id.is_empty() {
        "your_merchant_id"
    } else {
        profile.merchant_id.as_str()
    };

    format!(
        r#"// Import the Atlas Pricing Page component
import {{ AtlasPricingPage }} from '@atlas/react-components';

// Add this to your app's pricing page
function YourPricingPage() {{
  return (
    <AtlasPricingPage
      merchantId="{merchant_id}"
      onSubscribe={{(plan) => {{
        console.log('User subscribed to:', plan);
        // Handle subscription flow
      }}}}
    />
  );
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snippet() {
        let code = snippet(WidgetKind::PricingPage, &Appearance::default());
        assert!(code.contains(r#"<div id="atlas-pricing-widget"></div>"#));
        assert!(code.contains(r##"primaryColor: "#9b87f5""##));
        assert!(code.contains("borderRadius: 8,"));
        assert!(code.contains("showLogo: true,"));
    }

    #[test]
    fn test_portal_snippet_uses_own_script() {
        let code = snippet(WidgetKind::CustomerPortal, &Appearance::default());
        assert!(code.contains("widgets/customer-portal.js"));
    }

    #[test]
    fn test_prompt_reflects_appearance() {
        let appearance = Appearance {
            show_logo: false,
            border_radius: 0,
            ..Appearance::default()
        };
        let prompt = ai_prompt(WidgetKind::CustomerPortal, &appearance);

        assert!(prompt.starts_with("Add the Atlas Customer Portal Widget"));
        assert!(prompt.contains("- Border radius: 0px\n"));
        assert!(prompt.contains("- Hide Atlas logo\n"));
    }

    #[test]
    fn test_embed_uses_merchant_id() {
        let profile = UserProfile::sign_up("ada@example.com", "hunter22!");
        let embed = pricing_page_embed(&profile);
        assert!(embed.contains(&format!("merchantId=\"{}\"", profile.merchant_id)));
        assert!(embed.contains("onSubscribe={(plan) => {"));
    }
}
