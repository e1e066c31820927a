//! Local filesystem storage implementation.
//!
//! Writes go to a temporary sibling file first and are renamed into place,
//! so an interrupted run never leaves a half-written block behind.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::storage::StateStorage;

const CURRENT_FILE: &str = "p2000.new";
const PREVIOUS_FILE: &str = "p2000.old";
const DELTA_FILE: &str = "p2000.diff";

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Get the full path for a state file.
    pub fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        tokio::fs::create_dir_all(&self.root_dir).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Read a file as text, returning None if it doesn't exist.
    async fn read_text(&self, key: &str) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.path(key)).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    async fn write_lines(&self, key: &str, lines: &[String]) -> Result<()> {
        let mut text = String::new();
        for line in lines {
            text.push_str(line);
            text.push('\n');
        }
        self.write_bytes(key, text.as_bytes()).await
    }

    async fn read_lines(&self, key: &str) -> Result<Vec<String>> {
        Ok(self
            .read_text(key)
            .await?
            .map(|text| text.lines().map(String::from).collect())
            .unwrap_or_default())
    }
}

#[async_trait]
impl StateStorage for LocalStorage {
    async fn ensure(&self) -> Result<()> {
        for key in [CURRENT_FILE, PREVIOUS_FILE, DELTA_FILE] {
            if !tokio::fs::try_exists(self.path(key)).await? {
                log::info!("Creating empty state file {}", self.path(key).display());
                self.write_bytes(key, b"").await?;
            }
        }
        Ok(())
    }

    async fn write_current(&self, lines: &[String]) -> Result<()> {
        self.write_lines(CURRENT_FILE, lines).await
    }

    async fn read_current(&self) -> Result<Vec<String>> {
        self.read_lines(CURRENT_FILE).await
    }

    async fn read_previous(&self) -> Result<Vec<String>> {
        self.read_lines(PREVIOUS_FILE).await
    }

    async fn write_delta(&self, lines: &[String]) -> Result<()> {
        self.write_lines(DELTA_FILE, lines).await
    }

    async fn read_delta(&self) -> Result<Vec<String>> {
        self.read_lines(DELTA_FILE).await
    }

    async fn promote_current(&self) -> Result<()> {
        let current = self.read_text(CURRENT_FILE).await?.unwrap_or_default();
        self.write_bytes(PREVIOUS_FILE, current.as_bytes()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_ensure_creates_empty_files() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        storage.ensure().await.unwrap();

        for key in [CURRENT_FILE, PREVIOUS_FILE, DELTA_FILE] {
            let content = std::fs::read_to_string(tmp.path().join(key)).unwrap();
            assert!(content.is_empty(), "{key}");
        }
        assert!(storage.read_previous().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ensure_keeps_existing_content() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(PREVIOUS_FILE), "kept\n").unwrap();
        let storage = LocalStorage::new(tmp.path());

        storage.ensure().await.unwrap();
        assert_eq!(storage.read_previous().await.unwrap(), lines(&["kept"]));
    }

    #[tokio::test]
    async fn test_write_and_read_lines() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let block = lines(&["Sun 18 October 2026, 14:00:00 - Ambulance", "A1 Dam", "-----"]);

        storage.write_current(&block).await.unwrap();
        assert_eq!(storage.read_current().await.unwrap(), block);

        let raw = std::fs::read_to_string(storage.path(CURRENT_FILE)).unwrap();
        assert!(raw.ends_with("-----\n"));
        assert!(!storage.path("p2000.tmp").exists());
    }

    #[tokio::test]
    async fn test_promote_replaces_previous() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        storage.ensure().await.unwrap();

        storage.write_current(&lines(&["one", "-----"])).await.unwrap();
        storage.promote_current().await.unwrap();
        storage.write_current(&lines(&["two", "-----"])).await.unwrap();
        storage.promote_current().await.unwrap();

        assert_eq!(
            storage.read_previous().await.unwrap(),
            lines(&["two", "-----"])
        );
    }

    #[tokio::test]
    async fn test_read_nonexistent() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("missing"));
        assert!(storage.read_delta().await.unwrap().is_empty());
    }
}
