//! Persisted last-known price.
//!
//! The state file holds exactly one JSON object, `{"last_price": .., "last_timestamp": ..}`,
//! and is replaced wholesale on every update. Writes go to a sibling temp file that is
//! renamed over the target, so readers never see a half-written object.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::MonitorError;

/// Last observed gold price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRecord {
    /// Price in RM per gram.
    pub last_price: f64,
    /// ISO-8601 time of the reading.
    pub last_timestamp: String,
}

/// On-disk shape; older files may carry `null` for both fields.
#[derive(Deserialize)]
struct StoredRecord {
    last_price: Option<f64>,
    last_timestamp: Option<String>,
}

/// File-backed storage for the single `PriceRecord`.
#[derive(Debug, Clone)]
pub struct PriceStore {
    path: PathBuf,
}

impl PriceStore {
    /// Create a store backed by the file at `path`. The file is not touched until used.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the state file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored record.
    ///
    /// Returns `Ok(None)` when the file does not exist yet or holds a `null` price.
    /// Any other read or decode failure is returned to the caller.
    pub fn load(&self) -> Result<Option<PriceRecord>, MonitorError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let stored: StoredRecord = serde_json::from_slice(&bytes)?;
        Ok(stored.last_price.map(|last_price| PriceRecord {
            last_price,
            last_timestamp: stored.last_timestamp.unwrap_or_default(),
        }))
    }

    /// Replace the stored record with `record`.
    pub fn save(&self, record: &PriceRecord) -> Result<(), MonitorError> {
        let json = serde_json::to_vec_pretty(record)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> PriceStore {
        let dir = std::env::temp_dir().join(format!("gold_common_{}_{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("history.json");
        let _ = fs::remove_file(&path);
        PriceStore::new(path)
    }

    #[test]
    fn test_missing_file_is_no_baseline() {
        let store = temp_store("missing");
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_then_load() {
        let store = temp_store("save_load");
        let record = PriceRecord {
            last_price: 427.13,
            last_timestamp: "2026-10-16T09:30:00+08:00".to_string(),
        };
        store.save(&record).unwrap();
        assert_eq!(store.load().unwrap(), Some(record));

        let raw: serde_json::Value = serde_json::from_slice(&fs::read(store.path()).unwrap()).unwrap();
        assert_eq!(raw["last_price"], 427.13);
        assert_eq!(raw["last_timestamp"], "2026-10-16T09:30:00+08:00");
    }

    #[test]
    fn test_save_overwrites_whole_object() {
        let store = temp_store("overwrite");
        for (price, ts) in [(400.0, "a"), (401.5, "b")] {
            store
                .save(&PriceRecord {
                    last_price: price,
                    last_timestamp: ts.to_string(),
                })
                .unwrap();
        }
        let record = store.load().unwrap().unwrap();
        assert_eq!(record.last_price, 401.5);
        assert_eq!(record.last_timestamp, "b");
        let mut tmp = store.path().as_os_str().to_owned();
        tmp.push(".tmp");
        assert!(!Path::new(&tmp).exists());
    }

    #[test]
    fn test_null_price_is_no_baseline() {
        let store = temp_store("null");
        fs::write(store.path(), r#"{"last_price": null, "last_timestamp": null}"#).unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let store = temp_store("corrupt");
        fs::write(store.path(), "{not json").unwrap();
        assert!(matches!(store.load(), Err(MonitorError::Json(_))));
    }
}
