//! Merchant profile model
//!
//! The profile is the single record threaded through onboarding. It is never
//! mutated in place by callers; every change is expressed as a
//! [`ProfilePatch`] and applied with [`UserProfile::merged`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::warn;

use super::goal::Goal;
use super::ids::MerchantId;
use super::plan::{default_plans, Plan};

/// How the merchant arrived at their pricing model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PricingModelType {
    Manual,
    Recommended,
    AiRecommended,
    Imported,
}

impl fmt::Display for PricingModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Manual => write!(f, "manual"),
            Self::Recommended => write!(f, "recommended"),
            Self::AiRecommended => write!(f, "ai-recommended"),
            Self::Imported => write!(f, "imported"),
        }
    }
}

/// The merchant's pricing model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingModel {
    #[serde(rename = "type")]
    pub model_type: PricingModelType,

    #[serde(default)]
    pub plans: Vec<Plan>,
}

impl PricingModel {
    pub fn new(model_type: PricingModelType, plans: Vec<Plan>) -> Self {
        Self { model_type, plans }
    }
}

/// Read a stored pricing model; one that does not parse becomes the starter
/// plans (keeping the stored type when that part is readable)
fn lenient_pricing_model<'de, D>(deserializer: D) -> Result<Option<PricingModel>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let Some(raw) = raw.filter(|v| !v.is_null()) else {
        return Ok(None);
    };

    match serde_json::from_value::<PricingModel>(raw.clone()) {
        Ok(model) => Ok(Some(model)),
        Err(e) => {
            warn!(error = %e, "stored pricing model is unreadable, using the starter plans");
            let model_type = raw
                .get("type")
                .and_then(|t| serde_json::from_value(t.clone()).ok())
                .unwrap_or(PricingModelType::Manual);
            Ok(Some(PricingModel::new(model_type, default_plans())))
        }
    }
}

/// Stored next to the selected goal: its catalog entry, for readers that
/// do not know the goal ids
pub const GOAL_DETAILS_KEY: &str = "goalDetails";

/// The in-progress merchant account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub email: String,

    /// Stored as entered; this is a mock flow with no authentication
    #[serde(default)]
    pub password: String,

    /// Assigned once at sign-up
    #[serde(default)]
    pub merchant_id: MerchantId,

    #[serde(default)]
    pub selected_goals: Vec<Goal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_goal: Option<Goal>,

    #[serde(default, deserialize_with = "lenient_pricing_model")]
    pub pricing_model: Option<PricingModel>,

    #[serde(default)]
    pub sdk_integrated: bool,

    #[serde(default)]
    pub stripe_connected: bool,

    /// Keys of the stored object this model does not know about
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserProfile {
    /// Create the profile produced by a successful sign-up
    pub fn sign_up(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            merchant_id: MerchantId::generate(),
            ..Self::default()
        }
    }

    /// Shallow-merge a patch, returning the new profile
    pub fn merged(&self, patch: &ProfilePatch) -> Self {
        let mut next = self.clone();

        if let Some(email) = &patch.email {
            next.email = email.clone();
        }
        if let Some(password) = &patch.password {
            next.password = password.clone();
        }
        if let Some(goals) = &patch.selected_goals {
            next.selected_goals = goals.clone();
        }
        if let Some(goal) = &patch.selected_goal {
            let details: Vec<Value> = goal.info().map(|info| info.details()).into_iter().collect();
            next.extra.insert(GOAL_DETAILS_KEY.to_string(), Value::Array(details));
            next.selected_goal = Some(goal.clone());
        }
        if let Some(model) = &patch.pricing_model {
            next.pricing_model = model.clone();
        }
        if let Some(sdk) = patch.sdk_integrated {
            next.sdk_integrated = sdk;
        }
        if let Some(stripe) = patch.stripe_connected {
            next.stripe_connected = stripe;
        }

        next
    }

    /// Whether sign-up has happened
    pub fn is_signed_up(&self) -> bool {
        !self.merchant_id.is_empty()
    }

    /// Plans of the current pricing model, if any
    pub fn plans(&self) -> &[Plan] {
        self.pricing_model
            .as_ref()
            .map(|m| m.plans.as_slice())
            .unwrap_or(&[])
    }
}

/// A partial profile update; `None` fields are left untouched
///
/// There is deliberately no merchant id field: the id is immutable once
/// assigned at sign-up.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfilePatch {
    pub email: Option<String>,
    pub password: Option<String>,
    pub selected_goals: Option<Vec<Goal>>,
    pub selected_goal: Option<Goal>,
    /// `Some(None)` clears the pricing model
    pub pricing_model: Option<Option<PricingModel>>,
    pub sdk_integrated: Option<bool>,
    pub stripe_connected: Option<bool>,
}

impl ProfilePatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a selected goal in both goal fields
    pub fn goal(goal: Goal) -> Self {
        Self {
            selected_goals: Some(vec![goal.clone()]),
            selected_goal: Some(goal),
            ..Self::default()
        }
    }

    pub fn credentials(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
            ..Self::default()
        }
    }

    pub fn pricing_model(model: PricingModel) -> Self {
        Self {
            pricing_model: Some(Some(model)),
            ..Self::default()
        }
    }

    pub fn sdk_integrated(integrated: bool) -> Self {
        Self {
            sdk_integrated: Some(integrated),
            ..Self::default()
        }
    }

    pub fn stripe_connected(connected: bool) -> Self {
        Self {
            stripe_connected: Some(connected),
            ..Self::default()
        }
    }

    /// True when applying this patch cannot change anything
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
