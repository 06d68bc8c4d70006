//! Pricing plan model
//!
//! A plan is a named price point with an ordered list of features. Features
//! are matched across plans by name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder limit injected when a feature becomes limit-typed
pub const DEFAULT_FEATURE_LIMIT: &str = "10";

/// Default trial length for plans that offer one
pub const DEFAULT_TRIAL_DAYS: u32 = 14;

/// Feature names that are seeded as limits rather than booleans
pub const LIMIT_FEATURE_NAMES: [&str; 2] = ["Users", "Projects"];

/// How a plan is priced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    /// Always priced at "0"
    Free,
    /// Merchant-entered price
    #[default]
    Paid,
    /// Empty price, meaning "contact sales"
    Custom,
}

impl PlanType {
    /// Parse plan type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "free" => Some(Self::Free),
            "paid" => Some(Self::Paid),
            "custom" | "contact" | "enterprise" => Some(Self::Custom),
            _ => None,
        }
    }

    /// The price a plan is forced to when switching to this type, if any
    pub fn forced_price(&self) -> Option<&'static str> {
        match self {
            Self::Free => Some("0"),
            Self::Custom => Some(""),
            Self::Paid => None,
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => write!(f, "free"),
            Self::Paid => write!(f, "paid"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

/// Whether a feature is a simple on/off entitlement or a quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FeatureKind {
    Boolean,
    Limit {
        /// Free-text limit ("10", "Unlimited", ...)
        #[serde(default)]
        limit: String,
    },
}

/// Discriminant of [`FeatureKind`] used when editing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureType {
    Boolean,
    Limit,
}

impl FeatureType {
    /// Parse feature type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "boolean" | "bool" => Some(Self::Boolean),
            "limit" | "limited" => Some(Self::Limit),
            _ => None,
        }
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => write!(f, "boolean"),
            Self::Limit => write!(f, "limit"),
        }
    }
}

/// A single plan entitlement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    /// Identity key when matching features across plans
    pub name: String,

    #[serde(flatten)]
    pub kind: FeatureKind,
}

impl Feature {
    /// Create a boolean feature
    pub fn boolean(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FeatureKind::Boolean,
        }
    }

    /// Create a limit feature
    pub fn limit(name: impl Into<String>, limit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FeatureKind::Limit {
                limit: limit.into(),
            },
        }
    }

    /// Seed a feature for a freshly added plan: well-known quantity features
    /// start as limits with the placeholder value, everything else as boolean.
    pub fn seeded(name: &str) -> Self {
        if LIMIT_FEATURE_NAMES.contains(&name) {
            Self::limit(name, DEFAULT_FEATURE_LIMIT)
        } else {
            Self::boolean(name)
        }
    }

    pub fn feature_type(&self) -> FeatureType {
        match self.kind {
            FeatureKind::Boolean => FeatureType::Boolean,
            FeatureKind::Limit { .. } => FeatureType::Limit,
        }
    }

    /// The limit value, present only for limit features
    pub fn limit_value(&self) -> Option<&str> {
        match &self.kind {
            FeatureKind::Limit { limit } => Some(limit),
            FeatureKind::Boolean => None,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FeatureKind::Boolean => write!(f, "{}", self.name),
            FeatureKind::Limit { limit } => write!(f, "{}: {}", self.name, limit),
        }
    }
}

fn default_trial_days() -> u32 {
    DEFAULT_TRIAL_DAYS
}

/// A pricing plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Free-text label, not required to be unique
    pub name: String,

    /// Free-text numeric string; meaning depends on `plan_type`
    #[serde(default)]
    pub price: String,

    #[serde(default)]
    pub plan_type: PlanType,

    #[serde(default)]
    pub features: Vec<Feature>,

    #[serde(default)]
    pub trial_available: bool,

    #[serde(default = "default_trial_days")]
    pub trial_days: u32,

    /// Plan customers fall back to when they cancel
    #[serde(default)]
    pub default_on_cancel: bool,
}

impl Plan {
    /// Create a plan of the given type with its forced price applied
    pub fn new(name: impl Into<String>, plan_type: PlanType) -> Self {
        Self {
            name: name.into(),
            price: plan_type.forced_price().unwrap_or_default().to_string(),
            plan_type,
            features: Vec::new(),
            trial_available: false,
            trial_days: DEFAULT_TRIAL_DAYS,
            default_on_cancel: false,
        }
    }

    /// Create a paid plan with a price
    pub fn paid(name: impl Into<String>, price: impl Into<String>) -> Self {
        let mut plan = Self::new(name, PlanType::Paid);
        plan.price = price.into();
        plan
    }

    /// Builder-style feature list
    pub fn with_features(mut self, features: Vec<Feature>) -> Self {
        self.features = features;
        self
    }

    /// Builder-style trial
    pub fn with_trial(mut self, days: u32) -> Self {
        self.trial_available = true;
        self.trial_days = days;
        self
    }

    /// Parse the price as a number, if it is one
    pub fn numeric_price(&self) -> Option<f64> {
        match self.plan_type {
            PlanType::Free => Some(0.0),
            PlanType::Custom => None,
            PlanType::Paid => self.price.trim().parse::<f64>().ok(),
        }
    }

    /// Human-readable price ("Free", "$29/mo", "Contact sales")
    pub fn price_label(&self, currency: &str) -> String {
        match self.plan_type {
            PlanType::Free => "Free".to_string(),
            PlanType::Custom => "Contact sales".to_string(),
            PlanType::Paid if self.price.trim().is_empty() => "(no price)".to_string(),
            PlanType::Paid => format!("{}{}/mo", currency, self.price.trim()),
        }
    }

    /// Check whether the plan carries a feature with this name
    pub fn has_feature(&self, name: &str) -> bool {
        self.features.iter().any(|f| f.name == name)
    }

    /// Index of the feature with this name
    pub fn feature_position(&self, name: &str) -> Option<usize> {
        self.features.iter().position(|f| f.name == name)
    }
}

/// The plans a merchant starts with when nothing has been stored yet
pub fn default_plans() -> Vec<Plan> {
    let mut basic = Plan::new("Basic", PlanType::Free).with_features(vec![
        Feature::boolean("Core Features"),
        Feature::limit("Users", "5"),
    ]);
    basic.default_on_cancel = true;

    let pro = Plan::paid("Pro", "79")
        .with_features(vec![
            Feature::boolean("Core Features"),
            Feature::limit("Users", "20"),
            Feature::boolean("API Access"),
        ])
        .with_trial(DEFAULT_TRIAL_DAYS);

    let enterprise = Plan::new("Enterprise", PlanType::Custom).with_features(vec![
        Feature::boolean("Core Features"),
        Feature::limit("Users", "Unlimited"),
        Feature::boolean("API Access"),
        Feature::boolean("Premium Support"),
    ]);

    vec![basic, pro, enterprise]
}

/// Single plan shown on the pricing page step when no model exists yet
pub fn fallback_pricing_page_plan() -> Plan {
    Plan::paid("Basic Plan", "29").with_features(vec![
        Feature::limit("Users", "100"),
        Feature::boolean("Projects"),
        Feature::boolean("Basic Support"),
    ])
}
