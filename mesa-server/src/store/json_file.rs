//! Flat-JSON Store
//!
//! Simpler sibling of the structured-file store for content that does
//! not need the source shape (hero slides). Reads default on any error
//! because this content's absence is not catastrophic; writes overwrite
//! through a temp-file + rename, with no backup step.

use super::StoreResult;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use tokio::fs;

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// Parse a file as a single JSON value. Missing file or invalid
    /// JSON yields `T::default()` rather than an error.
    pub async fn read<T: DeserializeOwned + Default>(&self, file_name: &str) -> T {
        let path = self.path(file_name);
        let content = match fs::read_to_string(&path).await {
            Ok(c) => c,
            Err(e) => {
                tracing::debug!(file = file_name, error = %e, "json file unreadable, using default");
                return T::default();
            }
        };
        match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(file = file_name, error = %e, "json file corrupt, using default");
                T::default()
            }
        }
    }

    /// Serialize with stable 2-space indentation and overwrite.
    pub async fn write<T: Serialize>(&self, file_name: &str, value: &T) -> StoreResult<()> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.path(file_name);
        let encoded = serde_json::to_string_pretty(value)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, encoded.as_bytes()).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_reads_as_empty_vec() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        let slides: Vec<serde_json::Value> = store.read("hero-slides.json").await;
        assert!(slides.is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_reads_as_default() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("hero-slides.json"), "{ nope").unwrap();
        let store = JsonFileStore::new(dir.path());
        let slides: Vec<serde_json::Value> = store.read("hero-slides.json").await;
        assert!(slides.is_empty());
    }

    #[tokio::test]
    async fn write_then_read_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        let data = vec![serde_json::json!({"id": "1", "title": "Welcome"})];
        store.write("hero-slides.json", &data).await.unwrap();
        let read: Vec<serde_json::Value> = store.read("hero-slides.json").await;
        assert_eq!(read, data);
    }
}
