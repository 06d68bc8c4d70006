//! Storage layer for Atlas
//!
//! Provides the single key-value blob the merchant profile lives in, atomic
//! JSON writes, and the audit trail every mutation is recorded in.

pub mod file_io;
pub mod kv;
pub mod profile;

pub use file_io::{read_json, read_json_lenient, write_json_atomic};
pub use kv::KeyValueStore;
pub use profile::{ProfileRepository, USER_DATA_KEY};

use serde::Serialize;

use crate::audit::{generate_diff, redacted_value, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::AtlasPaths;
use crate::error::AtlasError;

/// Main storage coordinator
pub struct Storage {
    paths: AtlasPaths,
    pub profiles: ProfileRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: AtlasPaths) -> Result<Self, AtlasError> {
        paths.ensure_directories()?;

        Ok(Self {
            profiles: ProfileRepository::new(KeyValueStore::new(paths.storage_file())),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &AtlasPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), AtlasError> {
        self.profiles.load()
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Record a create operation in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), AtlasError> {
        let entry = AuditEntry::create(entity_type, entity_id, entity_name, entity);
        self.audit.log(&entry)
    }

    /// Record an update operation, with a diff of the two states
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Result<(), AtlasError> {
        let diff = match (redacted_value(before), redacted_value(after)) {
            (Some(before_json), Some(after_json)) => generate_diff(&before_json, &after_json),
            _ => None,
        };

        let entry = AuditEntry::update(entity_type, entity_id, entity_name, before, after, diff);
        self.audit.log(&entry)
    }

    /// Record a delete operation in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), AtlasError> {
        let entry = AuditEntry::delete(entity_type, entity_id, entity_name, entity);
        self.audit.log(&entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserProfile;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AtlasPaths::with_base_dir(temp_dir.path().join("atlas"));
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();

        assert!(temp_dir.path().join("atlas").exists());
        assert!(storage.profiles.get().unwrap().is_none());
    }

    #[test]
    fn test_audit_helpers_append_entries() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::new(AtlasPaths::with_base_dir(temp_dir.path().into())).unwrap();

        let before = UserProfile::sign_up("ada@example.com", "hunter22!");
        let mut after = before.clone();
        after.sdk_integrated = true;

        storage
            .log_create(EntityType::Profile, before.merchant_id.to_string(), None, &before)
            .unwrap();
        storage
            .log_update(EntityType::Profile, after.merchant_id.to_string(), None, &before, &after)
            .unwrap();

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[1].diff_summary.as_deref(),
            Some("sdkIntegrated: false -> true")
        );
    }
}
