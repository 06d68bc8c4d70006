//! YAML Export functionality
//!
//! Exports the merchant profile to YAML for human-readable review.

use crate::error::{AtlasError, AtlasResult};
use crate::export::json::ProfileExport;
use crate::storage::Storage;
use std::io::Write;

/// Export the stored profile to YAML
pub fn export_profile_yaml<W: Write>(storage: &Storage, writer: &mut W) -> AtlasResult<()> {
    let export = ProfileExport::from_storage(storage)?;

    writeln!(writer, "# Atlas Profile Export").map_err(|e| AtlasError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| AtlasError::Export(e.to_string()))?;
    writeln!(writer, "# App Version: {}", export.app_version)
        .map_err(|e| AtlasError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| AtlasError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| AtlasError::Export(e.to_string()))?;

    Ok(())
}
