//! Custom error types for Atlas
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for Atlas operations
#[derive(Error, Debug)]
pub enum AtlasError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Form and data validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// A simulated external call reported a failure
    #[error("Integration error: {0}")]
    Integration(String),

    /// A pending simulated call was cancelled
    #[error("Operation cancelled: {0}")]
    Cancelled(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl AtlasError {
    /// Create a "not found" error for plans
    pub fn plan_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Plan",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for features
    pub fn feature_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Feature",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for the merchant profile
    pub fn profile_not_found() -> Self {
        Self::NotFound {
            entity_type: "Profile",
            identifier: "userData".into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for AtlasError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AtlasError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Atlas operations
pub type AtlasResult<T> = Result<T, AtlasError>;
