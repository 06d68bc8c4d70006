//! Merchant identifier
//!
//! The merchant id is an opaque string handed out once at sign-up and embedded
//! in every SDK and widget snippet afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Prefix shared by every generated merchant id
pub const MERCHANT_ID_PREFIX: &str = "merchant_";

/// Number of random characters following the prefix
const MERCHANT_ID_RANDOM_LEN: usize = 9;

/// Opaque merchant identifier, e.g. `merchant_3f9a0c1bd`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct MerchantId(String);

impl MerchantId {
    /// Generate a new random merchant id
    pub fn generate() -> Self {
        let random = Uuid::new_v4().simple().to_string();
        Self(format!(
            "{}{}",
            MERCHANT_ID_PREFIX,
            &random[..MERCHANT_ID_RANDOM_LEN]
        ))
    }

    /// Wrap an existing id string
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when no id has been assigned yet
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MerchantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
