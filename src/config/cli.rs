use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};
use std::path::PathBuf;

/// Storage rooted at a local directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        if path.is_empty() {
            self.base_path.clone()
        } else {
            self.base_path.join(path)
        }
    }
}

impl Storage for LocalStorage {
    async fn ensure_dir(&self, path: &str) -> Result<()> {
        let full_path = self.resolve(path);
        tokio::fs::create_dir_all(&full_path)
            .await
            .map_err(|e| EtlError::filesystem(full_path.display().to_string(), e))
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);
        tokio::fs::write(&full_path, data)
            .await
            .map_err(|e| EtlError::filesystem(full_path.display().to_string(), e))
    }

    fn display_path(&self, path: &str) -> String {
        self.resolve(path).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        tokio_test::block_on(storage.ensure_dir("cities")).unwrap();
        tokio_test::block_on(storage.ensure_dir("cities")).unwrap();

        assert!(temp_dir.path().join("cities").is_dir());
    }

    #[tokio::test]
    async fn test_write_file_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage.write_file("states.json", b"[1]").await.unwrap();
        storage.write_file("states.json", b"[]").await.unwrap();

        let content = std::fs::read(temp_dir.path().join("states.json")).unwrap();
        assert_eq!(content, b"[]");
    }

    #[tokio::test]
    async fn test_write_into_missing_dir_is_filesystem_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        let err = storage
            .write_file("cities/KA.json", b"[]")
            .await
            .unwrap_err();
        assert!(matches!(err, EtlError::FilesystemError { .. }));
    }

    #[test]
    fn test_display_path() {
        let storage = LocalStorage::new("dist");
        assert_eq!(
            storage.display_path("states.json"),
            Path::new("dist").join("states.json").display().to_string()
        );
    }
}
