//! Configuration module for Atlas
//!
//! This module provides configuration management including:
//! - Platform path resolution with an environment override
//! - User settings persistence
//! - Simulated backend latency

pub mod paths;
pub mod settings;

pub use paths::AtlasPaths;
pub use settings::{Settings, SimulatedLatency};
