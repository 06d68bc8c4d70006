//! Onboarding wizard
//!
//! A pure step controller plus the interactive runner that walks a new
//! merchant from goal selection to a connected Stripe account.

pub mod controller;
pub mod prompt;
pub mod steps;
pub mod wizard;

pub use controller::{resolve_step, PricingView, ResearchTool, WizardController, WizardStep, STEPS};
pub use prompt::Console;
pub use wizard::{OnboardingResult, OnboardingWizard};
