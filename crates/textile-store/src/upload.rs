use std::path::{Path, PathBuf};

use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// File store rooted at the configured upload directory. Callers are
/// expected to pass already-sanitized names; `resolve` joins a single
/// path component onto the base dir.
pub struct UploadStore {
    base_dir: PathBuf,
}

impl UploadStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn resolve(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    /// Write the full payload under the upload dir, creating the dir on
    /// first use. Exactly one file appears at the destination on success.
    pub async fn put(&self, name: &str, data: Bytes) -> Result<PathBuf, StoreError> {
        tokio::fs::create_dir_all(&self.base_dir).await?;
        let path = self.resolve(name);
        tokio::fs::write(&path, &data).await?;
        Ok(path)
    }

    pub async fn read(&self, name: &str) -> Result<Bytes, StoreError> {
        let path = self.resolve(name);
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(name.to_string()))
            }
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    /// Idempotent: deleting a missing file is Ok.
    pub async fn delete(&self, name: &str) -> Result<(), StoreError> {
        let path = self.resolve(name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    pub async fn exists(&self, name: &str) -> Result<bool, StoreError> {
        let path = self.resolve(name);
        Ok(tokio::fs::try_exists(&path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_read_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::new(tmp.path());

        let path = store.put("report.txt", Bytes::from("hello")).await.unwrap();
        assert!(path.exists());
        let data = store.read("report.txt").await.unwrap();
        assert_eq!(data.as_ref(), b"hello");
    }

    #[tokio::test]
    async fn put_creates_missing_base_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::new(tmp.path().join("uploads"));

        store.put("a.bin", Bytes::from_static(&[0, 1, 2])).await.unwrap();
        assert!(store.exists("a.bin").await.unwrap());
    }

    #[tokio::test]
    async fn read_missing_returns_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::new(tmp.path());

        let err = store.read("nope.txt").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_file_and_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::new(tmp.path());

        store.put("x.txt", Bytes::from("x")).await.unwrap();
        store.delete("x.txt").await.unwrap();
        assert!(!store.exists("x.txt").await.unwrap());

        // Second delete is a no-op.
        store.delete("x.txt").await.unwrap();
    }
}
