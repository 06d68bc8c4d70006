//! File I/O utilities with atomic writes
//!
//! The storage blob is rewritten in full on every mutation, so each write goes
//! to a sibling temp file first and is renamed into place.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::error::AtlasError;

/// Read JSON from a file, returning a default value if the file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, AtlasError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        debug!(path = %path.display(), "file missing, using default");
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| AtlasError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AtlasError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Read JSON from a file, falling back to the default when the file is
/// missing *or* unparseable. Only a failure to open an existing file is an
/// error.
pub fn read_json_lenient<T, P>(path: P) -> Result<T, AtlasError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    match read_json(path.as_ref()) {
        Ok(value) => Ok(value),
        Err(AtlasError::Storage(message)) if message.starts_with("Failed to parse") => {
            warn!(path = %path.as_ref().display(), %message, "discarding unreadable data");
            Ok(T::default())
        }
        Err(e) => Err(e),
    }
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), AtlasError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            AtlasError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| AtlasError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| AtlasError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| AtlasError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| AtlasError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        AtlasError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    debug!(path = %path.display(), "wrote json");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Blob {
        email: String,
        steps: u32,
    }

    fn sample() -> Blob {
        Blob {
            email: "ada@example.com".to_string(),
            steps: 3,
        }
    }

    #[test]
    fn test_missing_file_reads_as_default() {
        let temp_dir = TempDir::new().unwrap();
        let blob: Blob = read_json(temp_dir.path().join("absent.json")).unwrap();
        assert_eq!(blob, Blob::default());
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");

        write_json_atomic(&path, &sample()).unwrap();

        let loaded: Blob = read_json(&path).unwrap();
        assert_eq!(loaded, sample());
        assert!(!temp_dir.path().join("storage.json.tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a").join("b").join("storage.json");

        write_json_atomic(&path, &sample()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_strict_read_rejects_garbage() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        fs::write(&path, "{not json").unwrap();

        let result: Result<Blob, _> = read_json(&path);
        assert!(matches!(result, Err(AtlasError::Storage(_))));
    }

    #[test]
    fn test_lenient_read_falls_back_on_garbage() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        fs::write(&path, "{not json").unwrap();

        let blob: Blob = read_json_lenient(&path).unwrap();
        assert_eq!(blob, Blob::default());
    }
}
