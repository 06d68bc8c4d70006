//! Terminal User Interface module
//!
//! A read-only ratatui dashboard. The sidebar reaches every route the CLI
//! exposes; editing stays with the CLI and the onboarding wizard.

pub mod app;
pub mod event;
pub mod handler;
pub mod layout;
pub mod terminal;

// Views
pub mod views;

pub use app::{App, Route};
pub use terminal::run_tui;
