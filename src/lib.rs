//! Atlas - terminal onboarding for the Atlas monetization platform
//!
//! This library provides the core functionality behind the `atlas` binary: a
//! merchant signs up, picks a goal, configures pricing plans, verifies the SDK,
//! previews the hosted pricing page and connects Stripe. Progress is kept in a
//! single JSON key-value file so onboarding can be resumed at any time.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: Diagnostic logging setup
//! - `models`: Core data models (profile, plans, features, goals)
//! - `storage`: JSON key-value storage layer
//! - `audit`: Audit logging system
//! - `services`: Business logic layer
//! - `onboarding`: The onboarding wizard
//! - `cli`, `display`, `export`, `tui`: User-facing surfaces
//!
//! # Example
//!
//! ```rust,ignore
//! use atlas::config::{paths::AtlasPaths, settings::Settings};
//!
//! let paths = AtlasPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod onboarding;
pub mod services;
pub mod storage;
pub mod tui;

pub use error::{AtlasError, AtlasResult};
