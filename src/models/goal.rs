//! Onboarding goals
//!
//! The goal a merchant picks on the first wizard step decides which sub-flow
//! the pricing configuration step branches into.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};
use std::fmt;

/// A goal the merchant can pick during onboarding
///
/// Stored as its kebab-case id. An id this build does not recognize is kept
/// verbatim so saving the profile does not rewrite it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Goal {
    CompetitorTracking,
    WtpInterview,
    PriceSensitivity,
    MonetizationAudit,
    ImportPricing,
    AiRecommendations,
    RecommendPricing,
    ManualPricing,
    Unknown(String),
}

/// Grouping shown next to each goal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalCategory {
    Analysis,
    Research,
    Pricing,
    Setup,
    Ai,
}

impl fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Analysis => write!(f, "Analysis"),
            Self::Research => write!(f, "Research"),
            Self::Pricing => write!(f, "Pricing"),
            Self::Setup => write!(f, "Setup"),
            Self::Ai => write!(f, "AI"),
        }
    }
}

/// Catalog entry describing a goal
#[derive(Debug, Clone)]
pub struct GoalInfo {
    pub goal: Goal,
    pub title: &'static str,
    pub description: &'static str,
    pub category: GoalCategory,
}

/// Every selectable goal, in display order
pub static GOAL_CATALOG: [GoalInfo; 8] = [
    GoalInfo {
        goal: Goal::CompetitorTracking,
        title: "Competitor Tracking Dashboard",
        description: "Basic comparison UI for monitoring competitors.",
        category: GoalCategory::Analysis,
    },
    GoalInfo {
        goal: Goal::WtpInterview,
        title: "WTP Interview Script Generator",
        description: "Generator for quick willingness-to-pay interview scripts.",
        category: GoalCategory::Research,
    },
    GoalInfo {
        goal: Goal::PriceSensitivity,
        title: "Van Westendorp Price Sensitivity Tool",
        description: "Form-based calculator for price sensitivity metering.",
        category: GoalCategory::Pricing,
    },
    GoalInfo {
        goal: Goal::MonetizationAudit,
        title: "Basic AI Monetization Audit",
        description: "Upload product docs for insights on usage and sentiment.",
        category: GoalCategory::Analysis,
    },
    GoalInfo {
        goal: Goal::ImportPricing,
        title: "Import Existing Pricing",
        description: "Import pricing from your website, a document, or pasted text.",
        category: GoalCategory::Setup,
    },
    GoalInfo {
        goal: Goal::AiRecommendations,
        title: "Get AI Recommendations",
        description: "Suggested pricing models that work well for similar businesses.",
        category: GoalCategory::Ai,
    },
    GoalInfo {
        goal: Goal::RecommendPricing,
        title: "Recommend a Pricing Model",
        description: "Answer three questions and get a starter plan.",
        category: GoalCategory::Pricing,
    },
    GoalInfo {
        goal: Goal::ManualPricing,
        title: "Create Plans Manually",
        description: "Build your plans and features from scratch.",
        category: GoalCategory::Setup,
    },
];

impl Goal {
    /// Parse a goal from its kebab-case id
    pub fn parse(id: &str) -> Self {
        match id.trim() {
            "competitor-tracking" => Self::CompetitorTracking,
            "wtp-interview" => Self::WtpInterview,
            "price-sensitivity" => Self::PriceSensitivity,
            "monetization-audit" => Self::MonetizationAudit,
            "import-pricing" => Self::ImportPricing,
            "ai-recommendations" => Self::AiRecommendations,
            "recommend-pricing" => Self::RecommendPricing,
            "manual-pricing" => Self::ManualPricing,
            _ => Self::Unknown(id.to_string()),
        }
    }

    /// The kebab-case id stored in the profile
    pub fn id(&self) -> &str {
        match self {
            Self::CompetitorTracking => "competitor-tracking",
            Self::WtpInterview => "wtp-interview",
            Self::PriceSensitivity => "price-sensitivity",
            Self::MonetizationAudit => "monetization-audit",
            Self::ImportPricing => "import-pricing",
            Self::AiRecommendations => "ai-recommendations",
            Self::RecommendPricing => "recommend-pricing",
            Self::ManualPricing => "manual-pricing",
            Self::Unknown(id) => id,
        }
    }

    /// Catalog metadata, absent for unknown goals
    pub fn info(&self) -> Option<&'static GoalInfo> {
        GOAL_CATALOG.iter().find(|info| info.goal == *self)
    }
}

impl GoalInfo {
    /// The `goalDetails` entry recorded next to the selected goal
    pub fn details(&self) -> Value {
        json!({
            "id": self.goal.id(),
            "title": self.title,
            "description": self.description,
            "category": self.category.to_string(),
        })
    }
}

impl Serialize for Goal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

impl<'de> Deserialize<'de> for Goal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        Ok(Self::parse(&id))
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.info() {
            Some(info) => write!(f, "{}", info.title),
            None => write!(f, "Unknown goal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_ids() {
        for info in GOAL_CATALOG.iter() {
            assert_eq!(Goal::parse(info.goal.id()), info.goal);
        }
    }

    #[test]
    fn test_unknown_goal_id() {
        let goal = Goal::parse("growth-hacking");
        assert_eq!(goal, Goal::Unknown("growth-hacking".into()));
        assert!(goal.info().is_none());
        assert_eq!(goal.to_string(), "Unknown goal");
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&Goal::WtpInterview).unwrap();
        assert_eq!(json, "\"wtp-interview\"");
    }

    #[test]
    fn test_unrecognized_id_survives_round_trip() {
        let goal: Goal = serde_json::from_str("\"something-new\"").unwrap();
        assert_eq!(goal, Goal::Unknown("something-new".into()));
        assert_eq!(serde_json::to_string(&goal).unwrap(), "\"something-new\"");
    }

    #[test]
    fn test_details_carry_catalog_metadata() {
        let details = Goal::AiRecommendations.info().unwrap().details();
        assert_eq!(details["id"], "ai-recommendations");
        assert_eq!(details["title"], "Get AI Recommendations");
        assert_eq!(details["category"], "AI");
    }
}
