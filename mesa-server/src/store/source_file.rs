//! Structured-File Store
//!
//! Wraps the literal codec with file I/O and a safety net. Each logical
//! file groups the exports that are always read and written together as
//! one unit. Writes back up the previous content to a `.backup` sibling
//! (best-effort), then replace the file through a temp-file + rename so
//! a failed encode or write never leaves a truncated document behind.
//!
//! Concurrency contract: single writer process, no file locking. Two
//! concurrent writers to the same logical file race and the last one
//! wins, accepted for the one-admin deployment this serves.

use super::codec::{self, DecodeOutcome, ExportLayout};
use super::{StoreError, StoreResult};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::fs;

/// A named group of exports persisted in one physical file.
#[derive(Debug, Clone, Copy)]
pub struct LogicalFile {
    pub file_name: &'static str,
    pub exports: &'static [ExportLayout],
}

/// Restaurant content: info singleton plus the three image collections.
pub const RESTAURANT_FILE: LogicalFile = LogicalFile {
    file_name: "restaurant.ts",
    exports: &[
        ExportLayout {
            name: "restaurantInfo",
            type_annotation: None,
        },
        ExportLayout {
            name: "galleryImages",
            type_annotation: None,
        },
        ExportLayout {
            name: "aboutImages",
            type_annotation: None,
        },
        ExportLayout {
            name: "interiorImages",
            type_annotation: None,
        },
    ],
};

/// Menu content: category list plus the item list.
pub const MENU_FILE: LogicalFile = LogicalFile {
    file_name: "menu.ts",
    exports: &[
        ExportLayout {
            name: "menuCategories",
            type_annotation: None,
        },
        ExportLayout {
            name: "menuItems",
            type_annotation: Some("MenuItem[]"),
        },
    ],
};

/// Store for source-shaped content files under one directory.
#[derive(Debug, Clone)]
pub struct SourceFileStore {
    dir: PathBuf,
}

impl SourceFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, logical: &LogicalFile) -> PathBuf {
        self.dir.join(logical.file_name)
    }

    /// Read and decode every export of a logical file.
    ///
    /// I/O failure propagates. Per-export decode failures are logged and
    /// skipped so one corrupted section cannot break the whole file.
    pub async fn read(&self, logical: &LogicalFile) -> StoreResult<BTreeMap<String, Value>> {
        let source = fs::read_to_string(self.path(logical)).await?;
        let names: Vec<&str> = logical.exports.iter().map(|e| e.name).collect();
        let DecodeOutcome { values, failures } = codec::decode(&source, &names);
        for failure in failures {
            tracing::warn!(
                file = logical.file_name,
                export = %failure.name,
                reason = %failure.reason,
                "failed to decode export, siblings unaffected"
            );
        }
        Ok(values)
    }

    /// Like [`read`](Self::read) but a missing file decodes to an empty
    /// mapping, for collections that start out empty.
    pub async fn read_or_empty(&self, logical: &LogicalFile) -> StoreResult<BTreeMap<String, Value>> {
        match self.read(logical).await {
            Ok(values) => Ok(values),
            Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(BTreeMap::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Encode the full mapping and overwrite the logical file.
    ///
    /// The current content is first copied to a `.backup` sibling;
    /// backup failure is logged but never blocks the write (there is
    /// nothing to back up on first write).
    pub async fn write(
        &self,
        logical: &LogicalFile,
        values: &BTreeMap<String, Value>,
    ) -> StoreResult<()> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.path(logical);

        let backup = path.with_extension("ts.backup");
        match fs::copy(&path, &backup).await {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    file = logical.file_name,
                    error = %e,
                    "backup before write failed, continuing"
                );
            }
        }

        // Encode fully before touching the file, then swap atomically so
        // readers never observe a partial document.
        let encoded = codec::encode(values, logical.exports);
        let tmp = path.with_extension("ts.tmp");
        fs::write(&tmp, encoded.as_bytes()).await?;
        fs::rename(&tmp, &path).await?;
        tracing::debug!(file = logical.file_name, exports = values.len(), "content file written");
        Ok(())
    }
}

/// Deserialize one export out of a decoded mapping; absent exports
/// return `None` (distinct from present-but-empty).
pub fn take_export<T: serde::de::DeserializeOwned>(
    values: &BTreeMap<String, Value>,
    name: &str,
) -> StoreResult<Option<T>> {
    match values.get(name) {
        None => Ok(None),
        Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
    }
}

/// Like [`take_export`] but a missing *or* shape-mismatched export
/// yields the default, so one bad section degrades to empty instead of
/// failing the whole read. The mismatch is logged.
pub fn take_export_or_default<T: serde::de::DeserializeOwned + Default>(
    values: &BTreeMap<String, Value>,
    name: &str,
) -> T {
    match take_export(values, name) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(export = name, error = %e, "export has unexpected shape, using default");
            T::default()
        }
    }
}

/// Serialize a value into an export slot.
pub fn put_export<T: serde::Serialize>(
    values: &mut BTreeMap<String, Value>,
    name: &str,
    value: &T,
) -> StoreResult<()> {
    values.insert(name.to_string(), serde_json::to_value(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn store() -> (TempDir, SourceFileStore) {
        let dir = TempDir::new().unwrap();
        let store = SourceFileStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let (_dir, store) = store();
        let mut values = BTreeMap::new();
        values.insert("menuCategories".to_string(), json!(["All", "Soups"]));
        values.insert("menuItems".to_string(), json!([{"id": "1", "name": "Caldo"}]));
        store.write(&MENU_FILE, &values).await.unwrap();
        let read = store.read(&MENU_FILE).await.unwrap();
        assert_eq!(read, values);
    }

    #[tokio::test]
    async fn second_write_creates_backup_of_previous_content() {
        let (dir, store) = store();
        let mut v1 = BTreeMap::new();
        v1.insert("menuCategories".to_string(), json!(["All"]));
        store.write(&MENU_FILE, &v1).await.unwrap();

        let mut v2 = BTreeMap::new();
        v2.insert("menuCategories".to_string(), json!(["All", "Wine"]));
        store.write(&MENU_FILE, &v2).await.unwrap();

        let backup = std::fs::read_to_string(dir.path().join("menu.ts.backup")).unwrap();
        assert!(backup.contains("\"All\""));
        assert!(!backup.contains("Wine"));
        // No temp file left behind
        assert!(!dir.path().join("menu.ts.tmp").exists());
    }

    #[tokio::test]
    async fn missing_file_read_is_io_error_but_or_empty_defaults() {
        let (_dir, store) = store();
        assert!(matches!(
            store.read(&MENU_FILE).await,
            Err(StoreError::Io(_))
        ));
        let values = store.read_or_empty(&MENU_FILE).await.unwrap();
        assert!(values.is_empty());
    }

    #[tokio::test]
    async fn corrupted_export_leaves_siblings_readable() {
        let (dir, store) = store();
        std::fs::create_dir_all(dir.path()).unwrap();
        std::fs::write(
            dir.path().join("menu.ts"),
            "export const menuCategories = [\"All\", \"Soups\"];\n\n\
             export const menuItems: MenuItem[] = [ { \"id\": ;\n",
        )
        .unwrap();
        let values = store.read(&MENU_FILE).await.unwrap();
        assert_eq!(values.get("menuCategories"), Some(&json!(["All", "Soups"])));
        assert!(!values.contains_key("menuItems"));
    }
}
