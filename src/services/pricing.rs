//! Pricing plan editor and pricing model persistence
//!
//! [`PricingEditor`] holds a collection of plans plus the shared feature
//! vocabulary and applies edits to them. Every edit reports whether anything
//! changed; an out-of-range index is a no-op, never a panic.
//!
//! [`PricingService`] loads and saves the plans in the `pricingModel` slice of
//! the stored profile object, and [`analytics`] derives the per-plan figures
//! shown beside them.

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::audit::EntityType;
use crate::error::{AtlasError, AtlasResult};
use crate::models::{
    default_plans, Feature, FeatureKind, FeatureType, Plan, PlanType, PricingModelType,
    DEFAULT_FEATURE_LIMIT,
};
use crate::storage::{Storage, USER_DATA_KEY};

/// A single plan-level edit
#[derive(Debug, Clone, PartialEq)]
pub enum PlanField {
    Name(String),
    /// Ignored unless the plan is paid
    Price(String),
    /// Free forces the price to "0", custom clears it
    PlanType(PlanType),
    TrialAvailable(bool),
    /// Must be at least one day
    TrialDays(u32),
}

/// A single feature-level edit
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureField {
    Name(String),
    /// Switching to limit injects the placeholder limit; to boolean drops it
    Type(FeatureType),
    /// Ignored on boolean features
    Limit(String),
}

/// In-memory plan collection with a shared feature vocabulary
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PricingEditor {
    plans: Vec<Plan>,
    shared_features: Vec<String>,
}

impl PricingEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an editor over existing plans
    ///
    /// The shared set is the union of feature names in order of first
    /// appearance. If several plans claim to be the cancel default, only the
    /// first keeps the flag.
    pub fn from_plans(mut plans: Vec<Plan>) -> Self {
        let mut shared_features: Vec<String> = Vec::new();
        for feature in plans.iter().flat_map(|p| p.features.iter()) {
            if !shared_features.contains(&feature.name) {
                shared_features.push(feature.name.clone());
            }
        }

        let mut seen_default = false;
        for plan in plans.iter_mut().filter(|p| p.default_on_cancel) {
            if seen_default {
                warn!(plan = %plan.name, "dropping duplicate default-on-cancel flag");
                plan.default_on_cancel = false;
            }
            seen_default = true;
        }

        Self {
            plans,
            shared_features,
        }
    }

    /// Editor over the starter plans
    pub fn with_defaults() -> Self {
        Self::from_plans(default_plans())
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn plan(&self, index: usize) -> Option<&Plan> {
        self.plans.get(index)
    }

    pub fn shared_features(&self) -> &[String] {
        &self.shared_features
    }

    pub fn into_plans(self) -> Vec<Plan> {
        self.plans
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    /// Index of the plan customers fall back to on cancel
    pub fn default_on_cancel(&self) -> Option<usize> {
        self.plans.iter().position(|p| p.default_on_cancel)
    }

    /// Resolve a plan by 1-based position or case-insensitive name
    pub fn find_plan(&self, identifier: &str) -> Option<usize> {
        let identifier = identifier.trim();
        if let Ok(number) = identifier.parse::<usize>() {
            if (1..=self.plans.len()).contains(&number) {
                return Some(number - 1);
            }
        }

        self.plans
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(identifier))
    }

    /// Append a paid plan seeded with every shared feature; returns its index
    pub fn add_plan(&mut self) -> usize {
        let mut plan = Plan::new(format!("Plan {}", self.plans.len() + 1), PlanType::Paid);
        plan.features = self
            .shared_features
            .iter()
            .map(|name| Feature::seeded(name))
            .collect();

        self.plans.push(plan);
        self.plans.len() - 1
    }

    /// Remove the plan at `index`
    ///
    /// The shared vocabulary is left alone, so features of the removed plan
    /// stay available to new plans.
    pub fn remove_plan(&mut self, index: usize) -> bool {
        if index >= self.plans.len() {
            return false;
        }

        let removed = self.plans.remove(index);
        debug!(plan = %removed.name, "removed plan");
        true
    }

    /// Apply a plan-level edit
    pub fn update_plan_field(&mut self, index: usize, field: PlanField) -> bool {
        let Some(plan) = self.plans.get_mut(index) else {
            return false;
        };

        match field {
            PlanField::Name(name) => replace(&mut plan.name, name),
            PlanField::Price(price) => {
                if plan.plan_type != PlanType::Paid {
                    return false;
                }
                replace(&mut plan.price, price)
            }
            PlanField::PlanType(plan_type) => {
                let mut changed = replace(&mut plan.plan_type, plan_type);
                if let Some(forced) = plan_type.forced_price() {
                    changed |= replace(&mut plan.price, forced.to_string());
                }
                changed
            }
            PlanField::TrialAvailable(available) => replace(&mut plan.trial_available, available),
            PlanField::TrialDays(0) => false,
            PlanField::TrialDays(days) => replace(&mut plan.trial_days, days),
        }
    }

    /// Apply a feature-level edit to one plan's feature
    pub fn update_feature(
        &mut self,
        plan_index: usize,
        feature_index: usize,
        field: FeatureField,
    ) -> bool {
        let Some(plan) = self.plans.get_mut(plan_index) else {
            return false;
        };
        let Some(feature) = plan.features.get(feature_index) else {
            return false;
        };

        match field {
            FeatureField::Name(new_name) => {
                let new_name = new_name.trim().to_string();
                let old_name = feature.name.clone();
                if new_name.is_empty() || new_name == old_name || plan.has_feature(&new_name) {
                    return false;
                }

                plan.features[feature_index].name = new_name.clone();
                if !self.shared_features.contains(&new_name) {
                    self.shared_features.push(new_name);
                }
                self.forget_if_unreferenced(&old_name);
                true
            }
            FeatureField::Type(feature_type) => {
                if feature.feature_type() == feature_type {
                    return false;
                }
                plan.features[feature_index].kind = match feature_type {
                    FeatureType::Boolean => FeatureKind::Boolean,
                    FeatureType::Limit => FeatureKind::Limit {
                        limit: DEFAULT_FEATURE_LIMIT.to_string(),
                    },
                };
                true
            }
            FeatureField::Limit(value) => match &mut plan.features[feature_index].kind {
                FeatureKind::Limit { limit } => replace(limit, value),
                FeatureKind::Boolean => false,
            },
        }
    }

    /// Add a boolean feature to the shared set and to every plan lacking it
    pub fn add_feature_everywhere(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }

        let mut changed = false;
        if !self.shared_features.iter().any(|f| f == name) {
            self.shared_features.push(name.to_string());
            changed = true;
        }

        for plan in self.plans.iter_mut().filter(|p| !p.has_feature(name)) {
            plan.features.push(Feature::boolean(name));
            changed = true;
        }

        changed
    }

    /// Remove one feature from one plan; the name leaves the shared set once
    /// no plan references it
    pub fn remove_feature(&mut self, plan_index: usize, feature_index: usize) -> bool {
        let Some(plan) = self.plans.get_mut(plan_index) else {
            return false;
        };
        if feature_index >= plan.features.len() {
            return false;
        }

        let removed = plan.features.remove(feature_index);
        self.forget_if_unreferenced(&removed.name);
        true
    }

    /// Strip a feature from every plan and from the shared set
    pub fn remove_feature_everywhere(&mut self, name: &str) -> bool {
        let name = name.trim();
        let mut changed = false;

        for plan in self.plans.iter_mut() {
            let before = plan.features.len();
            plan.features.retain(|f| f.name != name);
            changed |= plan.features.len() != before;
        }

        let before = self.shared_features.len();
        self.shared_features.retain(|f| f != name);
        changed | (self.shared_features.len() != before)
    }

    /// Make the plan at `index` the only cancel default
    pub fn set_default_on_cancel(&mut self, index: usize) -> bool {
        if index >= self.plans.len() {
            return false;
        }

        let mut changed = false;
        for (i, plan) in self.plans.iter_mut().enumerate() {
            changed |= replace(&mut plan.default_on_cancel, i == index);
        }
        changed
    }

    fn forget_if_unreferenced(&mut self, name: &str) {
        if !self.plans.iter().any(|p| p.has_feature(name)) {
            self.shared_features.retain(|f| f != name);
        }
    }
}

/// Assign and report whether the value differed
fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

/// Mock customers per plan position
pub const MOCK_CUSTOMERS_PER_PLAN: [u32; 3] = [12, 45, 8];

/// Mock monthly churn percentage per plan position
pub const MOCK_CHURN_RATES: [f64; 3] = [1.2, 3.5, 4.8];

/// Mock upgrade rates between adjacent plan positions
pub const MOCK_CONVERSION_RATES: [(usize, usize, f64); 2] = [(0, 1, 8.5), (1, 2, 4.2)];

/// Figures shown for one plan
#[derive(Debug, Clone, PartialEq)]
pub struct PlanAnalytics {
    pub name: String,
    pub customers: u32,
    /// Share of all customers on the listed plans, in percent
    pub share: f64,
    pub churn_rate: Option<f64>,
    /// Customers times price; `None` for custom or non-numeric prices
    pub monthly_revenue: Option<f64>,
}

/// A customer movement between two plans
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub from: String,
    pub to: String,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricingAnalytics {
    pub plans: Vec<PlanAnalytics>,
    pub conversions: Vec<Conversion>,
    pub total_customers: u32,
    pub total_mrr: f64,
}

/// Derive per-plan analytics from the mock figures
pub fn analytics(plans: &[Plan]) -> PricingAnalytics {
    let customers: Vec<u32> = (0..plans.len())
        .map(|i| MOCK_CUSTOMERS_PER_PLAN.get(i).copied().unwrap_or(0))
        .collect();
    let total_customers: u32 = customers.iter().sum();

    let per_plan: Vec<PlanAnalytics> = plans
        .iter()
        .zip(&customers)
        .enumerate()
        .map(|(i, (plan, &count))| PlanAnalytics {
            name: plan.name.clone(),
            customers: count,
            share: if total_customers == 0 {
                0.0
            } else {
                f64::from(count) / f64::from(total_customers) * 100.0
            },
            churn_rate: MOCK_CHURN_RATES.get(i).copied(),
            monthly_revenue: plan.numeric_price().map(|price| price * f64::from(count)),
        })
        .collect();

    let conversions = MOCK_CONVERSION_RATES
        .iter()
        .filter_map(|&(from, to, rate)| {
            Some(Conversion {
                from: plans.get(from)?.name.clone(),
                to: plans.get(to)?.name.clone(),
                rate,
            })
        })
        .collect();

    let total_mrr = per_plan.iter().filter_map(|p| p.monthly_revenue).sum();

    PricingAnalytics {
        plans: per_plan,
        conversions,
        total_customers,
        total_mrr,
    }
}

/// Loads and saves the plans stored in the profile's pricing model
pub struct PricingService<'a> {
    storage: &'a Storage,
}

impl<'a> PricingService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Stored plans, if the pricing model carries a readable plan list
    pub fn stored_plans(&self) -> AtlasResult<Option<Vec<Plan>>> {
        let object = self.storage.profiles.get_raw_object()?;
        let Some(plans) = object.get("pricingModel").and_then(|m| m.get("plans")) else {
            return Ok(None);
        };

        match serde_json::from_value::<Vec<Plan>>(plans.clone()) {
            Ok(plans) => Ok(Some(plans)),
            Err(e) => {
                warn!(error = %e, "stored plans are unreadable, using defaults");
                Ok(None)
            }
        }
    }

    /// An editor over the stored plans, or the starter plans when there are none
    pub fn load(&self) -> AtlasResult<PricingEditor> {
        Ok(match self.stored_plans()? {
            Some(plans) => PricingEditor::from_plans(plans),
            None => PricingEditor::with_defaults(),
        })
    }

    /// Write the editor's plans as a manual pricing model
    ///
    /// Every other key of the stored object is preserved; the object is
    /// created if nothing is stored yet.
    pub fn save(&self, editor: &PricingEditor) -> AtlasResult<()> {
        let mut object = self.storage.profiles.get_raw_object()?;
        let before = object.get("pricingModel").cloned().unwrap_or(Value::Null);

        let after = json!({
            "type": PricingModelType::Manual,
            "plans": editor.plans(),
        });
        if before == after {
            return Ok(());
        }
        object.insert("pricingModel".to_string(), after.clone());
        self.storage.profiles.save_raw_object(object.clone())?;

        let entity_id = object
            .get("merchantId")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .unwrap_or(USER_DATA_KEY)
            .to_string();
        self.storage
            .log_update(EntityType::PricingModel, entity_id, None, &before, &after)?;

        debug!(plans = editor.len(), "saved pricing model");
        Ok(())
    }

    /// Replace the stored plans with the starter plans
    pub fn reset(&self) -> AtlasResult<PricingEditor> {
        let editor = PricingEditor::with_defaults();
        self.save(&editor)?;
        Ok(editor)
    }

    /// Remove a stored plan; the last remaining plan cannot be removed
    pub fn remove_plan(&self, identifier: &str) -> AtlasResult<Plan> {
        let mut editor = self.load()?;
        let index = editor
            .find_plan(identifier)
            .ok_or_else(|| AtlasError::plan_not_found(identifier))?;
        if editor.len() == 1 {
            return Err(AtlasError::Validation(
                "At least one plan is required".into(),
            ));
        }

        let removed = editor
            .plan(index)
            .cloned()
            .ok_or_else(|| AtlasError::plan_not_found(identifier))?;
        editor.remove_plan(index);
        self.save(&editor)?;
        self.storage.log_delete(
            EntityType::Plan,
            removed.name.clone(),
            Some(removed.name.clone()),
            &removed,
        )?;

        Ok(removed)
    }

    /// Add a feature to every plan lacking it
    ///
    /// Returns `false` when every plan already has it; nothing is written then.
    pub fn add_feature(&self, name: &str) -> AtlasResult<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AtlasError::Validation("Feature name is required".into()));
        }

        let mut editor = self.load()?;
        if !editor.add_feature_everywhere(name) {
            return Ok(false);
        }
        self.save(&editor)?;
        self.storage.log_create(
            EntityType::Feature,
            name,
            Some(name.to_string()),
            &Feature::boolean(name),
        )?;

        Ok(true)
    }

    /// Strip a feature from every plan
    pub fn remove_feature(&self, name: &str) -> AtlasResult<()> {
        let name = name.trim();
        let mut editor = self.load()?;
        if !editor.remove_feature_everywhere(name) {
            return Err(AtlasError::feature_not_found(name));
        }
        self.save(&editor)?;
        self.storage
            .log_delete(EntityType::Feature, name, Some(name.to_string()), &name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::AtlasPaths;
    use crate::models::UserProfile;
    use tempfile::TempDir;

    fn single_basic_plan() -> PricingEditor {
        PricingEditor::from_plans(vec![
            Plan::paid("Basic", "29").with_features(vec![Feature::boolean("Core Features")])
        ])
    }

    fn defaults_flagged(editor: &PricingEditor) -> usize {
        editor.plans().iter().filter(|p| p.default_on_cancel).count()
    }

    #[test]
    fn test_add_plan_copies_shared_features() {
        let mut editor = single_basic_plan();
        let index = editor.add_plan();

        assert_eq!(index, 1);
        assert_eq!(editor.len(), 2);
        let plan = &editor.plans()[1];
        assert_eq!(plan.name, "Plan 2");
        assert_eq!(plan.plan_type, PlanType::Paid);
        assert_eq!(plan.features, vec![Feature::boolean("Core Features")]);
    }

    #[test]
    fn test_add_plan_seeds_limit_features() {
        let mut editor = PricingEditor::with_defaults();
        let index = editor.add_plan();

        let plan = &editor.plans()[index];
        assert_eq!(plan.name, "Plan 4");
        let users = &plan.features[plan.feature_position("Users").unwrap()];
        assert_eq!(users.limit_value(), Some(DEFAULT_FEATURE_LIMIT));
        assert!(!plan.default_on_cancel);
    }

    #[test]
    fn test_paid_to_free_forces_zero_price() {
        let mut editor = PricingEditor::from_plans(vec![Plan::paid("Pro", "79")]);
        assert!(editor.update_plan_field(0, PlanField::PlanType(PlanType::Free)));
        assert_eq!(editor.plans()[0].price, "0");

        assert!(editor.update_plan_field(0, PlanField::PlanType(PlanType::Custom)));
        assert_eq!(editor.plans()[0].price, "");

        // Back to paid keeps whatever price is there
        assert!(editor.update_plan_field(0, PlanField::PlanType(PlanType::Paid)));
        assert_eq!(editor.plans()[0].price, "");
    }

    #[test]
    fn test_price_edit_ignored_on_free_plan() {
        let mut editor = PricingEditor::with_defaults();
        assert!(!editor.update_plan_field(0, PlanField::Price("49".into())));
        assert_eq!(editor.plans()[0].price, "0");

        assert!(editor.update_plan_field(1, PlanField::Price("99".into())));
        assert_eq!(editor.plans()[1].price, "99");
    }

    #[test]
    fn test_trial_edits() {
        let mut editor = PricingEditor::with_defaults();
        assert!(editor.update_plan_field(0, PlanField::TrialAvailable(true)));
        assert!(editor.update_plan_field(0, PlanField::TrialDays(30)));
        assert!(!editor.update_plan_field(0, PlanField::TrialDays(0)));
        assert_eq!(editor.plans()[0].trial_days, 30);
    }

    #[test]
    fn test_invalid_indexes_are_noops() {
        let mut editor = PricingEditor::with_defaults();
        let snapshot = editor.clone();

        assert!(!editor.remove_plan(9));
        assert!(!editor.update_plan_field(9, PlanField::Name("X".into())));
        assert!(!editor.update_feature(0, 9, FeatureField::Type(FeatureType::Limit)));
        assert!(!editor.update_feature(9, 0, FeatureField::Type(FeatureType::Limit)));
        assert!(!editor.remove_feature(0, 9));
        assert!(!editor.set_default_on_cancel(9));
        assert_eq!(editor, snapshot);
    }

    #[test]
    fn test_feature_type_switch_injects_and_drops_limit() {
        let mut editor = single_basic_plan();

        assert!(editor.update_feature(0, 0, FeatureField::Type(FeatureType::Limit)));
        assert_eq!(editor.plans()[0].features[0].limit_value(), Some("10"));

        assert!(editor.update_feature(0, 0, FeatureField::Type(FeatureType::Boolean)));
        assert_eq!(editor.plans()[0].features[0].limit_value(), None);
        assert_eq!(editor.plans()[0].features[0].kind, FeatureKind::Boolean);
    }

    #[test]
    fn test_limit_edit_only_applies_to_limit_features() {
        let mut editor = PricingEditor::with_defaults();
        // Pro: Core Features (boolean), Users (limit 20)
        assert!(!editor.update_feature(1, 0, FeatureField::Limit("3".into())));
        assert!(editor.update_feature(1, 1, FeatureField::Limit("50".into())));
        assert_eq!(editor.plans()[1].features[1].limit_value(), Some("50"));
    }

    #[test]
    fn test_rename_keeps_shared_set_consistent() {
        let mut editor = single_basic_plan();
        assert!(editor.update_feature(0, 0, FeatureField::Name("Everything".into())));

        assert_eq!(editor.shared_features(), &["Everything".to_string()]);
        assert!(!editor.update_feature(0, 0, FeatureField::Name("  ".into())));
    }

    #[test]
    fn test_rename_keeps_name_still_used_elsewhere() {
        let mut editor = PricingEditor::with_defaults();
        assert!(editor.update_feature(2, 3, FeatureField::Name("24/7 Support".into())));
        assert!(editor.shared_features().contains(&"24/7 Support".to_string()));
        assert!(!editor.shared_features().contains(&"Premium Support".to_string()));

        assert!(editor.update_feature(1, 2, FeatureField::Name("Webhooks".into())));
        // Enterprise still has API Access
        assert!(editor.shared_features().contains(&"API Access".to_string()));
    }

    #[test]
    fn test_add_feature_everywhere() {
        let mut editor = PricingEditor::with_defaults();
        assert!(editor.add_feature_everywhere(" SSO "));

        assert!(editor.plans().iter().all(|p| p.has_feature("SSO")));
        assert_eq!(editor.shared_features().last().map(String::as_str), Some("SSO"));
        assert!(!editor.add_feature_everywhere("SSO"));
        assert!(!editor.add_feature_everywhere("   "));
    }

    #[test]
    fn test_add_then_remove_everywhere_leaves_shared_set_clean() {
        let mut editor = PricingEditor::with_defaults();
        editor.add_feature_everywhere("X");

        for plan_index in 0..editor.len() {
            let position = editor.plans()[plan_index].feature_position("X").unwrap();
            assert!(editor.remove_feature(plan_index, position));
            let still_shared = editor.shared_features().contains(&"X".to_string());
            assert_eq!(still_shared, plan_index + 1 < editor.len());
        }

        assert!(!editor.shared_features().contains(&"X".to_string()));
    }

    #[test]
    fn test_remove_feature_everywhere() {
        let mut editor = PricingEditor::with_defaults();
        assert!(editor.remove_feature_everywhere("API Access"));

        assert!(editor.plans().iter().all(|p| !p.has_feature("API Access")));
        assert!(!editor.shared_features().contains(&"API Access".to_string()));
        assert!(!editor.remove_feature_everywhere("API Access"));
    }

    #[test]
    fn test_set_default_on_cancel_from_any_state() {
        let mut plans = default_plans();
        for plan in plans.iter_mut() {
            plan.default_on_cancel = true;
        }
        // Bypass from_plans normalization to start from a broken state
        let mut editor = PricingEditor {
            plans,
            shared_features: Vec::new(),
        };

        assert!(editor.set_default_on_cancel(2));
        assert_eq!(defaults_flagged(&editor), 1);
        assert_eq!(editor.default_on_cancel(), Some(2));

        let mut empty_defaults = PricingEditor::from_plans(vec![Plan::paid("A", "1")]);
        assert!(empty_defaults.set_default_on_cancel(0));
        assert_eq!(defaults_flagged(&empty_defaults), 1);
    }

    #[test]
    fn test_from_plans_normalizes() {
        let mut plans = default_plans();
        plans[2].default_on_cancel = true;

        let editor = PricingEditor::from_plans(plans);
        assert_eq!(editor.default_on_cancel(), Some(0));
        assert_eq!(defaults_flagged(&editor), 1);
        assert_eq!(
            editor.shared_features(),
            &["Core Features", "Users", "API Access", "Premium Support"].map(String::from)
        );
    }

    #[test]
    fn test_removing_default_plan_leaves_no_default() {
        let mut editor = PricingEditor::with_defaults();
        assert!(editor.remove_plan(0));
        assert_eq!(editor.default_on_cancel(), None);
    }

    #[test]
    fn test_find_plan() {
        let editor = PricingEditor::with_defaults();
        assert_eq!(editor.find_plan("2"), Some(1));
        assert_eq!(editor.find_plan("enterprise"), Some(2));
        assert_eq!(editor.find_plan("0"), None);
        assert_eq!(editor.find_plan("Gold"), None);
    }

    #[test]
    fn test_analytics_for_default_plans() {
        let report = analytics(&default_plans());

        assert_eq!(report.total_customers, 65);
        assert_eq!(report.plans[0].monthly_revenue, Some(0.0));
        assert_eq!(report.plans[1].monthly_revenue, Some(45.0 * 79.0));
        assert_eq!(report.plans[2].monthly_revenue, None);
        assert_eq!(report.total_mrr, 3555.0);
        assert_eq!(report.conversions.len(), 2);
        assert_eq!(report.conversions[0].from, "Basic");
    }

    #[test]
    fn test_analytics_beyond_mock_range() {
        let mut editor = PricingEditor::with_defaults();
        editor.add_plan();
        let report = analytics(editor.plans());

        assert_eq!(report.plans[3].customers, 0);
        assert_eq!(report.plans[3].churn_rate, None);
        assert_eq!(report.plans[3].monthly_revenue, None);
    }

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = AtlasPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_load_falls_back_to_defaults() {
        let (_temp, storage) = create_test_storage();
        let editor = PricingService::new(&storage).load().unwrap();
        assert_eq!(editor, PricingEditor::with_defaults());
    }

    #[test]
    fn test_load_falls_back_on_unreadable_plans() {
        let (_temp, storage) = create_test_storage();
        let object = json!({"pricingModel": {"type": "manual", "plans": "oops"}});
        storage
            .profiles
            .save_raw_object(object.as_object().unwrap().clone())
            .unwrap();

        let editor = PricingService::new(&storage).load().unwrap();
        assert_eq!(editor.len(), 3);
    }

    #[test]
    fn test_save_preserves_other_keys() {
        let (_temp, storage) = create_test_storage();
        let profile = UserProfile::sign_up("ada@example.com", "hunter22!");
        storage.profiles.save(&profile).unwrap();

        let service = PricingService::new(&storage);
        let mut editor = service.load().unwrap();
        editor.add_plan();
        service.save(&editor).unwrap();

        let stored = storage.profiles.get().unwrap().unwrap();
        assert_eq!(stored.email, "ada@example.com");
        assert_eq!(stored.merchant_id, profile.merchant_id);
        let model = stored.pricing_model.unwrap();
        assert_eq!(model.model_type, PricingModelType::Manual);
        assert_eq!(model.plans.len(), 4);

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.last().unwrap().entity_type, EntityType::PricingModel);
        assert_eq!(entries.last().unwrap().entity_id, profile.merchant_id.to_string());
    }

    #[test]
    fn test_save_creates_object_when_missing() {
        let (_temp, storage) = create_test_storage();
        PricingService::new(&storage)
            .save(&PricingEditor::with_defaults())
            .unwrap();

        let object = storage.profiles.get_raw_object().unwrap();
        assert_eq!(object["pricingModel"]["type"], "manual");
        assert_eq!(object.len(), 1);
    }

    #[test]
    fn test_service_feature_add_and_remove() {
        let (_temp, storage) = create_test_storage();
        let service = PricingService::new(&storage);

        assert!(service.add_feature("SSO").unwrap());
        assert!(service.load().unwrap().plans().iter().all(|p| p.has_feature("SSO")));

        // Already everywhere: no write, no audit entry
        let count = storage.audit().entry_count().unwrap();
        assert!(!service.add_feature(" SSO ").unwrap());
        assert_eq!(storage.audit().entry_count().unwrap(), count);

        assert!(service.add_feature("  ").unwrap_err().is_validation());

        service.remove_feature("SSO").unwrap();
        assert!(!service.load().unwrap().shared_features().iter().any(|f| f == "SSO"));
        assert!(service.remove_feature("SSO").unwrap_err().is_not_found());

        let entries = storage.audit().read_all().unwrap();
        let feature_ops: Vec<Operation> = entries
            .iter()
            .filter(|e| e.entity_type == EntityType::Feature)
            .map(|e| e.operation)
            .collect();
        assert_eq!(feature_ops, vec![Operation::Create, Operation::Delete]);
    }

    #[test]
    fn test_service_remove_plan_keeps_last() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::new(AtlasPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        storage
            .profiles
            .save(&UserProfile::sign_up("ada@example.com", "hunter22!"))
            .unwrap();
        let service = PricingService::new(&storage);

        assert_eq!(service.remove_plan("enterprise").unwrap().name, "Enterprise");
        assert!(service.remove_plan("Gold").unwrap_err().is_not_found());
        service.remove_plan("1").unwrap();
        assert!(service.remove_plan("Pro").unwrap_err().is_validation());
        assert_eq!(service.load().unwrap().len(), 1);

        let entries = storage.audit().read_all().unwrap();
        assert!(entries
            .iter()
            .any(|e| e.entity_type == EntityType::Plan && e.entity_name.as_deref() == Some("Basic")));
    }
}
