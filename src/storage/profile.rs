//! Profile repository over the key-value blob
//!
//! The merchant profile lives under a single key. The pricing screen edits
//! the `pricingModel` slice of the same stored object directly, so raw access
//! is exposed alongside the typed one.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::AtlasError;
use crate::models::UserProfile;

use super::kv::KeyValueStore;

/// Storage key holding the merchant profile
pub const USER_DATA_KEY: &str = "userData";

pub struct ProfileRepository {
    store: KeyValueStore,
}

impl ProfileRepository {
    pub fn new(store: KeyValueStore) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Result<(), AtlasError> {
        self.store.load()
    }

    /// The stored profile; `None` when absent or unreadable
    pub fn get(&self) -> Result<Option<UserProfile>, AtlasError> {
        self.store.get(USER_DATA_KEY)
    }

    /// Replace the stored profile with this one
    pub fn save(&self, profile: &UserProfile) -> Result<(), AtlasError> {
        debug!(merchant_id = %profile.merchant_id, "saving profile");
        self.store.set(USER_DATA_KEY, profile)
    }

    /// The stored object as raw JSON, or an empty object if there is none
    /// or it is not an object
    pub fn get_raw_object(&self) -> Result<Map<String, Value>, AtlasError> {
        match self.store.get_raw(USER_DATA_KEY)? {
            Some(Value::Object(map)) => Ok(map),
            _ => Ok(Map::new()),
        }
    }

    /// Write a raw object under the profile key
    pub fn save_raw_object(&self, object: Map<String, Value>) -> Result<(), AtlasError> {
        self.store.set_raw(USER_DATA_KEY, Value::Object(object))
    }

    /// Whether anything is stored under the profile key
    pub fn exists(&self) -> Result<bool, AtlasError> {
        Ok(self.store.get_raw(USER_DATA_KEY)?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{default_plans, PricingModelType, ProfilePatch};
    use serde_json::json;
    use tempfile::TempDir;

    fn repo(temp_dir: &TempDir) -> ProfileRepository {
        let repo = ProfileRepository::new(KeyValueStore::new(
            temp_dir.path().join("storage.json"),
        ));
        repo.load().unwrap();
        repo
    }

    #[test]
    fn test_empty_store_has_no_profile() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);

        assert!(repo.get().unwrap().is_none());
        assert!(!repo.exists().unwrap());
        assert!(repo.get_raw_object().unwrap().is_empty());
    }

    #[test]
    fn test_merge_then_reload_is_lossless() {
        let temp_dir = TempDir::new().unwrap();
        let profile = UserProfile::sign_up("ada@example.com", "hunter22!");
        repo(&temp_dir).save(&profile).unwrap();

        let patch = ProfilePatch::stripe_connected(true);
        let merged = profile.merged(&patch);
        repo(&temp_dir).save(&merged).unwrap();

        let reloaded = repo(&temp_dir).get().unwrap().unwrap();
        assert_eq!(reloaded, profile.merged(&patch));
    }

    #[test]
    fn test_bad_pricing_model_falls_back_to_starter_plans() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);
        repo.save_raw_object(
            json!({
                "email": "ada@example.com",
                "password": "hunter22!",
                "merchantId": "merchant_abcdefghi",
                "pricingModel": {"type": "imported", "plans": "oops"},
                "sdkIntegrated": true,
                "referrer": "newsletter"
            })
            .as_object()
            .unwrap()
            .clone(),
        )
        .unwrap();

        let profile = repo.get().unwrap().expect("profile must survive");
        assert_eq!(profile.merchant_id.as_str(), "merchant_abcdefghi");
        assert!(profile.sdk_integrated);
        assert_eq!(profile.extra["referrer"], "newsletter");

        let model = profile.pricing_model.unwrap();
        assert_eq!(model.model_type, PricingModelType::Imported);
        assert_eq!(model.plans, default_plans());
    }

    #[test]
    fn test_unknown_pricing_type_keeps_profile() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);
        repo.save_raw_object(
            json!({
                "email": "ada@example.com",
                "merchantId": "merchant_abcdefghi",
                "pricingModel": {"type": "usage-based", "plans": []}
            })
            .as_object()
            .unwrap()
            .clone(),
        )
        .unwrap();

        let profile = repo.get().unwrap().unwrap();
        let model = profile.pricing_model.unwrap();
        assert_eq!(model.model_type, PricingModelType::Manual);
        assert_eq!(model.plans.len(), 3);
    }
}
