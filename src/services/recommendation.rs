//! Pricing recommendation flows
//!
//! The guided flow asks three questions and proposes a single starter plan.
//! The AI flow proposes three tiers. Both are canned: the answers are
//! recorded but do not change the proposal.

use crate::models::{Feature, Plan, PlanType, PricingModel, PricingModelType};

/// One selectable answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

const fn choice(value: &'static str, label: &'static str) -> Choice {
    Choice { value, label }
}

pub const APP_TYPES: [Choice; 5] = [
    choice("saas", "SaaS Application"),
    choice("content", "Content Platform"),
    choice("ecommerce", "E-commerce"),
    choice("mobile", "Mobile App"),
    choice("other", "Other"),
];

pub const CUSTOMER_TYPES: [Choice; 4] = [
    choice("business", "Businesses (B2B)"),
    choice("consumer", "Consumers (B2C)"),
    choice("developer", "Developers"),
    choice("mixed", "Mixed audience"),
];

pub const VALUE_METRICS: [Choice; 5] = [
    choice("users", "Users"),
    choice("projects", "Projects"),
    choice("api", "API Calls"),
    choice("storage", "Storage"),
    choice("other", "Other"),
];

/// Position in the guided flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendStep {
    AppType,
    CustomerType,
    ValueMetric,
    Review,
}

impl RecommendStep {
    /// Question text and answers, absent on the review step
    pub fn question(&self) -> Option<(&'static str, &'static [Choice])> {
        match self {
            Self::AppType => Some(("What type of app are you building?", &APP_TYPES[..])),
            Self::CustomerType => Some(("Who are your customers?", &CUSTOMER_TYPES[..])),
            Self::ValueMetric => Some(("What do customers get more of as they pay more?", &VALUE_METRICS[..])),
            Self::Review => None,
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::AppType => 0,
            Self::CustomerType => 1,
            Self::ValueMetric => 2,
            Self::Review => 3,
        }
    }

    fn from_index(index: usize) -> Self {
        match index {
            0 => Self::AppType,
            1 => Self::CustomerType,
            2 => Self::ValueMetric,
            _ => Self::Review,
        }
    }
}

/// State of the three-question recommendation flow
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendFlow {
    step: RecommendStep,
    answers: [Option<Choice>; 3],
}

impl Default for RecommendFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendFlow {
    pub fn new() -> Self {
        Self {
            step: RecommendStep::AppType,
            answers: [None; 3],
        }
    }

    pub fn step(&self) -> RecommendStep {
        self.step
    }

    /// Answer given for a question step
    pub fn answer(&self, step: RecommendStep) -> Option<Choice> {
        self.answers.get(step.index()).copied().flatten()
    }

    /// Record the answer to the current question; false on the review step
    /// or for a value that is not one of the offered choices
    pub fn select(&mut self, value: &str) -> bool {
        let Some((_, choices)) = self.step.question() else {
            return false;
        };
        let Some(found) = choices.iter().find(|c| c.value == value) else {
            return false;
        };

        self.answers[self.step.index()] = Some(*found);
        true
    }

    /// Move to the next step; requires the current question to be answered
    pub fn advance(&mut self) -> bool {
        if self.step == RecommendStep::Review || self.answer(self.step).is_none() {
            return false;
        }
        self.step = RecommendStep::from_index(self.step.index() + 1);
        true
    }

    /// Move back a step; false on the first question, where the caller
    /// returns to the choice screen
    pub fn back(&mut self) -> bool {
        match self.step.index() {
            0 => false,
            i => {
                self.step = RecommendStep::from_index(i - 1);
                true
            }
        }
    }

    /// The proposed plan
    pub fn recommended_plan(&self) -> Plan {
        recommended_plan()
    }

    /// Pricing model stored when the merchant accepts the proposal
    pub fn accept(&self) -> PricingModel {
        PricingModel::new(PricingModelType::Recommended, vec![self.recommended_plan()])
    }
}

/// Starter plan the guided flow proposes
pub fn recommended_plan() -> Plan {
    Plan::paid("Basic Plan", "29").with_features(vec![
        Feature::limit("Users", "100"),
        Feature::limit("Projects", "Unlimited"),
        Feature::boolean("Basic Support"),
        Feature::boolean("API Access"),
    ])
}

/// Tiered plans the AI flow proposes
pub fn ai_recommended_plans() -> Vec<Plan> {
    let mut starter = Plan::paid("Starter", "19").with_features(vec![
        Feature::boolean("Core Features"),
        Feature::limit("Users", "5"),
        Feature::boolean("Email Support"),
    ]);
    starter.default_on_cancel = true;

    let growth = Plan::paid("Growth", "49")
        .with_features(vec![
            Feature::boolean("Core Features"),
            Feature::limit("Users", "25"),
            Feature::boolean("API Access"),
            Feature::boolean("Priority Support"),
        ])
        .with_trial(14);

    let scale = Plan::new("Scale", PlanType::Custom).with_features(vec![
        Feature::boolean("Core Features"),
        Feature::limit("Users", "Unlimited"),
        Feature::boolean("API Access"),
        Feature::boolean("SSO"),
        Feature::boolean("Dedicated Success Manager"),
    ]);

    vec![starter, growth, scale]
}

/// Pricing model stored when the merchant accepts the AI proposal
pub fn ai_pricing_model() -> PricingModel {
    PricingModel::new(PricingModelType::AiRecommended, ai_recommended_plans())
}
