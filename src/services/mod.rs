//! Service layer for Atlas
//!
//! Business logic on top of the storage layer: sign-up and profile updates,
//! the pricing editor, the recommendation and import flows, simulated
//! integrations, and the sample data behind the dashboard and widgets.

pub mod dashboard;
pub mod import;
pub mod integration;
pub mod pricing;
pub mod profile;
pub mod recommendation;
pub mod widget;

pub use dashboard::DashboardMode;
pub use import::{ImportFlow, ImportSource, ImportStage};
pub use integration::{CallOutcome, CallScope, IntegrationService};
pub use pricing::{FeatureField, PlanField, PricingEditor, PricingService};
pub use profile::ProfileService;
pub use recommendation::{RecommendFlow, RecommendStep};
pub use widget::{Appearance, WidgetKind};
