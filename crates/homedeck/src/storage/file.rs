use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};
use crate::storage::Storage;

/// File-backed storage rooted at a workspace directory. Each document is a
/// pretty-printed `.json` file; intermediate keys become directories.
#[derive(Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn build_path(&self, keys: &[&str]) -> CoreResult<PathBuf> {
        if keys.is_empty() {
            return Err(CoreError::InvalidInput("storage keys empty".to_string()));
        }
        let mut path = self.root.clone();
        for key in &keys[..keys.len() - 1] {
            validate_key(key)?;
            path.push(key);
        }
        let mut filename = keys[keys.len() - 1].to_string();
        validate_key(&filename)?;
        if !filename.ends_with(".json") {
            filename.push_str(".json");
        }
        path.push(filename);
        Ok(path)
    }

    fn build_dir(&self, keys: &[&str]) -> CoreResult<PathBuf> {
        let mut path = self.root.clone();
        for key in keys {
            validate_key(key)?;
            path.push(key);
        }
        Ok(path)
    }

    async fn ensure_parent_dir(path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|error| {
                CoreError::Internal(format!(
                    "failed to create storage directory {}: {error}",
                    parent.display()
                ))
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn write(&self, keys: &[&str], data: &Value) -> CoreResult<()> {
        let path = self.build_path(keys)?;
        Self::ensure_parent_dir(&path).await?;
        let serialized = serde_json::to_vec_pretty(data)
            .map_err(|error| CoreError::Internal(format!("storage serialize error: {error}")))?;
        tokio::fs::write(&path, serialized).await.map_err(|error| {
            CoreError::Internal(format!(
                "failed to write storage file {}: {error}",
                path.display()
            ))
        })?;
        Ok(())
    }

    async fn read(&self, keys: &[&str]) -> CoreResult<Option<Value>> {
        let path = self.build_path(keys)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(CoreError::Internal(format!(
                    "failed to read storage file {}: {error}",
                    path.display()
                )))
            }
        };
        let value = serde_json::from_slice(&bytes)
            .map_err(|error| CoreError::Internal(format!("storage parse error: {error}")))?;
        Ok(Some(value))
    }

    async fn list(&self, keys: &[&str]) -> CoreResult<Vec<String>> {
        let dir = self.build_dir(keys)?;
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => {
                return Err(CoreError::Internal(format!(
                    "failed to list storage directory {}: {error}",
                    dir.display()
                )))
            }
        };
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|error| {
            CoreError::Internal(format!("failed to read storage entry: {error}"))
        })? {
            let name = entry.file_name().to_string_lossy().to_string();
            if let Some(stem) = name.strip_suffix(".json") {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    async fn delete(&self, keys: &[&str]) -> CoreResult<bool> {
        let path = self.build_path(keys)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(error) => Err(CoreError::Internal(format!(
                "failed to delete storage file {}: {error}",
                path.display()
            ))),
        }
    }
}

fn validate_key(key: &str) -> CoreResult<()> {
    if key.is_empty() || key == "." || key == ".." {
        return Err(CoreError::InvalidInput(format!("invalid storage key {key}")));
    }
    if key.contains('/') || key.contains('\\') {
        return Err(CoreError::InvalidInput(format!("invalid storage key {key}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn writes_and_reads_json() {
        let dir = tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path().to_path_buf());
        let value = serde_json::json!({ "hello": "world" });
        storage
            .write(&["tools", "todo"], &value)
            .await
            .expect("write");
        let loaded = storage
            .read(&["tools", "todo"])
            .await
            .expect("read")
            .expect("value");
        assert_eq!(value, loaded);
    }

    #[tokio::test]
    async fn missing_file_returns_none() {
        let dir = tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path().to_path_buf());
        let loaded = storage.read(&["missing", "value"]).await.expect("read");
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn invalid_key_rejected() {
        let dir = tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path().to_path_buf());
        let value = serde_json::json!({ "ok": true });
        let err = storage
            .write(&["..", "bad"], &value)
            .await
            .expect_err("invalid key");
        match err {
            CoreError::InvalidInput(_) => {}
            _ => panic!("expected invalid input"),
        }
    }

    #[tokio::test]
    async fn list_returns_sorted_document_names() {
        let dir = tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path().to_path_buf());
        let value = serde_json::json!(1);
        storage.write(&["tools", "b"], &value).await.expect("write");
        storage.write(&["tools", "a"], &value).await.expect("write");
        let names = storage.list(&["tools"]).await.expect("list");
        assert_eq!(names, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn list_missing_directory_is_empty() {
        let dir = tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path().to_path_buf());
        assert!(storage.list(&["nothing"]).await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn delete_reports_presence() {
        let dir = tempdir().expect("tempdir");
        let storage = FileStorage::new(dir.path().to_path_buf());
        let value = serde_json::json!({ "x": 1 });
        storage.write(&["doc"], &value).await.expect("write");
        assert!(storage.delete(&["doc"]).await.expect("delete"));
        assert!(!storage.delete(&["doc"]).await.expect("delete again"));
        assert!(storage.read(&["doc"]).await.expect("read").is_none());
    }
}
