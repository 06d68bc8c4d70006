//! Core data models for Atlas
//!
//! This module contains the data structures of the onboarding domain: the
//! merchant profile, pricing plans and features, and onboarding goals.

pub mod goal;
pub mod ids;
pub mod plan;
pub mod profile;

pub use goal::{Goal, GoalCategory, GoalInfo, GOAL_CATALOG};
pub use ids::MerchantId;
pub use plan::{
    default_plans, Feature, FeatureKind, FeatureType, Plan, PlanType, DEFAULT_FEATURE_LIMIT,
    DEFAULT_TRIAL_DAYS,
};
pub use profile::{PricingModel, PricingModelType, ProfilePatch, UserProfile};
