//! Store — durable cache of the last common-plants result set.
//!
//! Each catalog owns one preference file, `<data_dir>/<store>_data_store.json`,
//! holding a JSON object of string keys to string values. The cached records
//! live as a JSON-array string under the catalog's key. Saving replaces the
//! whole blob; nothing is ever merged.
//!
//! Loading never fails: a missing file, a missing key, or a blob that does
//! not decode all read as an empty cache, so the caller falls back to the
//! provider.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::{catalog::Catalog, error::StoreError, types::PlantRecord};

/// Persistence for one catalog's cached records.
pub trait RecordStore: Send + Sync {
    /// The latest saved snapshot, or an empty list.
    fn load(&self) -> Vec<PlantRecord>;

    /// Replace the snapshot with `records`.
    fn save(&self, records: &[PlantRecord]) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct LocalRecordStore {
    path: PathBuf,
    key: String,
}

impl LocalRecordStore {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self { path: path.into(), key: key.into() }
    }

    /// The store for `catalog` inside `data_dir`.
    pub fn for_catalog(data_dir: &Path, catalog: Catalog) -> Self {
        let file = format!("{}_data_store.json", catalog.store_name());
        Self::new(data_dir.join(file), catalog.store_key())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_preferences(&self) -> Option<BTreeMap<String, String>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "store: read failed");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(prefs) => Some(prefs),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "store: preference file is corrupt");
                None
            }
        }
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io { path: self.path.clone(), source }
    }
}

impl RecordStore for LocalRecordStore {
    fn load(&self) -> Vec<PlantRecord> {
        let Some(prefs) = self.read_preferences() else {
            return Vec::new();
        };
        let Some(blob) = prefs.get(&self.key) else {
            return Vec::new();
        };
        let records = decode(blob);
        tracing::debug!(path = %self.path.display(), count = records.len(), "store: loaded");
        records
    }

    fn save(&self, records: &[PlantRecord]) -> Result<(), StoreError> {
        let mut prefs = self.read_preferences().unwrap_or_default();
        prefs.insert(self.key.clone(), serde_json::to_string(records)?);
        let encoded = serde_json::to_string_pretty(&prefs)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, encoded).map_err(|e| self.io_error(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;

        tracing::debug!(path = %self.path.display(), count = records.len(), "store: saved");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// A [`RecordStore`] that keeps the encoded blob in memory. Used when no data
/// directory is available, and in tests.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    blob: Mutex<Option<String>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a raw blob, bypassing encoding.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self { blob: Mutex::new(Some(blob.into())) }
    }
}

impl RecordStore for MemoryRecordStore {
    fn load(&self) -> Vec<PlantRecord> {
        let guard = self.blob.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.as_deref().map(decode).unwrap_or_default()
    }

    fn save(&self, records: &[PlantRecord]) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(records)?;
        let mut guard = self.blob.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(encoded);
        Ok(())
    }
}

fn decode(blob: &str) -> Vec<PlantRecord> {
    serde_json::from_str(blob).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "store: cached records did not decode, treating cache as empty");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Usage;
    use pretty_assertions::assert_eq;

    fn mint() -> PlantRecord {
        PlantRecord::new("Mint", "Mentha", "digestive aid", Usage::Text("tea".into()))
    }

    #[test]
    fn memory_round_trip() {
        let store = MemoryRecordStore::new();
        assert!(store.load().is_empty());
        store.save(&[mint()]).unwrap();
        assert_eq!(store.load(), vec![mint()]);
    }

    #[test]
    fn malformed_blob_reads_as_empty() {
        let store = MemoryRecordStore::with_blob("[{\"name\":");
        assert!(store.load().is_empty());
    }

    #[test]
    fn file_store_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, r#"{"theme":"dark"}"#).unwrap();

        let store = LocalRecordStore::new(&path, "plants");
        store.save(&[mint()]).unwrap();

        let prefs: BTreeMap<String, String> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(prefs.get("theme").map(String::as_str), Some("dark"));
        assert_eq!(store.load(), vec![mint()]);
    }
}
