//! JSON Export functionality
//!
//! Exports the merchant profile with derived onboarding status and schema
//! versioning. The password never leaves storage in an export.

use crate::error::{AtlasError, AtlasResult};
use crate::models::UserProfile;
use crate::services::dashboard::{checklist, checklist_progress, DashboardMode};
use crate::services::profile::ProfileService;
use crate::storage::Storage;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::Write;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Placeholder written in place of the password
pub const REDACTED: &str = "***";

/// Profile export structure
#[derive(Debug, Clone, Serialize)]
pub struct ProfileExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// The stored profile with its password redacted
    pub profile: UserProfile,

    /// Export metadata for reference
    pub metadata: ExportMetadata,
}

/// Derived figures included for reference
#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    /// Number of plans in the pricing model
    pub plan_count: usize,

    /// Number of distinct feature names across all plans
    pub feature_count: usize,

    /// Dashboard the profile qualifies for
    pub dashboard_mode: String,

    /// Onboarding checklist completion, in percent
    pub onboarding_progress: u8,
}

impl ProfileExport {
    /// Build an export from a profile
    pub fn from_profile(profile: &UserProfile) -> Self {
        let mut profile = profile.clone();
        if !profile.password.is_empty() {
            profile.password = REDACTED.to_string();
        }

        let features: BTreeSet<&str> = profile
            .plans()
            .iter()
            .flat_map(|p| p.features.iter().map(|f| f.name.as_str()))
            .collect();

        let metadata = ExportMetadata {
            plan_count: profile.plans().len(),
            feature_count: features.len(),
            dashboard_mode: DashboardMode::for_profile(&profile).to_string(),
            onboarding_progress: checklist_progress(&checklist(&profile)),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            profile,
            metadata,
        }
    }

    /// Create an export of the stored profile
    pub fn from_storage(storage: &Storage) -> AtlasResult<Self> {
        let profile = ProfileService::new(storage).require()?;
        Ok(Self::from_profile(&profile))
    }
}

/// Export the stored profile to JSON
pub fn export_profile_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> AtlasResult<()> {
    let export = ProfileExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| AtlasError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::AtlasPaths;
    use crate::models::{default_plans, PricingModel, PricingModelType, ProfilePatch};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = AtlasPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_profile_export() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ProfileService::new(&storage);
        service.sign_up("ada@example.com", "hunter22!").unwrap();
        service
            .update(&ProfilePatch::pricing_model(PricingModel::new(
                PricingModelType::Manual,
                default_plans(),
            )))
            .unwrap();

        let export = ProfileExport::from_storage(&storage).unwrap();

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.profile.password, REDACTED);
        assert_eq!(export.metadata.plan_count, 3);
        // Core Features, Users, API Access, Premium Support
        assert_eq!(export.metadata.feature_count, 4);
        assert_eq!(export.metadata.onboarding_progress, 50);
        assert_eq!(export.metadata.dashboard_mode, "Development");
    }

    #[test]
    fn test_json_uses_stored_field_names() {
        let (_temp_dir, storage) = create_test_storage();
        ProfileService::new(&storage)
            .sign_up("ada@example.com", "hunter22!")
            .unwrap();

        let mut buffer = Vec::new();
        export_profile_json(&storage, &mut buffer, true).unwrap();
        let json = String::from_utf8(buffer).unwrap();

        assert!(json.contains("\"merchantId\""));
        assert!(json.contains("\"sdkIntegrated\": false"));
        assert!(!json.contains("hunter22!"));
    }

    #[test]
    fn test_export_without_profile_is_not_found() {
        let (_temp_dir, storage) = create_test_storage();
        let err = ProfileExport::from_storage(&storage).unwrap_err();
        assert!(err.is_not_found());
    }
}
