//! User settings for Atlas
//!
//! Manages preferences such as the latency of the simulated backend calls,
//! the currency symbol used in displays and onboarding completion state.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::paths::AtlasPaths;
use crate::error::AtlasError;

/// Latency of each simulated backend call, in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatedLatency {
    #[serde(default = "default_signup_delay")]
    pub signup_delay_ms: u64,

    #[serde(default = "default_sdk_test_delay")]
    pub sdk_test_delay_ms: u64,

    #[serde(default = "default_stripe_connect_delay")]
    pub stripe_connect_delay_ms: u64,

    #[serde(default = "default_import_delay")]
    pub import_delay_ms: u64,

    #[serde(default = "default_pricing_page_delay")]
    pub pricing_page_delay_ms: u64,
}

fn default_signup_delay() -> u64 {
    1000
}

fn default_sdk_test_delay() -> u64 {
    2000
}

fn default_stripe_connect_delay() -> u64 {
    1500
}

fn default_import_delay() -> u64 {
    1500
}

fn default_pricing_page_delay() -> u64 {
    1000
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self {
            signup_delay_ms: default_signup_delay(),
            sdk_test_delay_ms: default_sdk_test_delay(),
            stripe_connect_delay_ms: default_stripe_connect_delay(),
            import_delay_ms: default_import_delay(),
            pricing_page_delay_ms: default_pricing_page_delay(),
        }
    }
}

impl SimulatedLatency {
    /// No latency at all (used by tests and scripted runs)
    pub fn instant() -> Self {
        Self {
            signup_delay_ms: 0,
            sdk_test_delay_ms: 0,
            stripe_connect_delay_ms: 0,
            import_delay_ms: 0,
            pricing_page_delay_ms: 0,
        }
    }

    pub fn signup(&self) -> Duration {
        Duration::from_millis(self.signup_delay_ms)
    }

    pub fn sdk_test(&self) -> Duration {
        Duration::from_millis(self.sdk_test_delay_ms)
    }

    pub fn stripe_connect(&self) -> Duration {
        Duration::from_millis(self.stripe_connect_delay_ms)
    }

    pub fn import(&self) -> Duration {
        Duration::from_millis(self.import_delay_ms)
    }

    pub fn pricing_page(&self) -> Duration {
        Duration::from_millis(self.pricing_page_delay_ms)
    }
}

/// User settings for Atlas
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Simulated backend latency
    #[serde(default)]
    pub latency: SimulatedLatency,

    /// Currency symbol used when displaying prices
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Trial length given to newly created plans
    #[serde(default = "default_trial_days")]
    pub default_trial_days: u32,

    /// Whether the onboarding wizard reached its final step
    #[serde(default)]
    pub onboarding_completed: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_trial_days() -> u32 {
    14
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            latency: SimulatedLatency::default(),
            currency_symbol: default_currency(),
            default_trial_days: default_trial_days(),
            onboarding_completed: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &AtlasPaths) -> Result<Self, AtlasError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| AtlasError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                AtlasError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &AtlasPaths) -> Result<(), AtlasError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| AtlasError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| AtlasError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
