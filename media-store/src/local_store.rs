use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::store::{ObjectStore, StoreResult};

/// An `ObjectStore` implementation that writes objects into a local
/// directory. Used for development and tests.
#[derive(Clone, Debug)]
pub struct LocalObjectStore {
    directory: PathBuf,
}

impl LocalObjectStore {
    /// Creates a new `LocalObjectStore` targeting the specified directory.
    pub fn new(directory: PathBuf) -> Self {
        Self { directory }
    }

    fn object_path(&self, key: &str) -> PathBuf {
        let mut path = self.directory.clone();
        path.push(key);
        path
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put_object(&self, key: &str, data: &[u8], content_type: &str) -> StoreResult<()> {
        // The filesystem cannot carry content-type metadata; keys embed the
        // extension, which is enough for local serving.
        tracing::debug!("writing {} ({} bytes, {})", key, data.len(), content_type);
        fs::write(self.object_path(key), data).await?;
        Ok(())
    }

    async fn get_object(&self, key: &str) -> StoreResult<Vec<u8>> {
        let data = fs::read(self.object_path(key)).await?;
        Ok(data)
    }

    async fn delete_object(&self, key: &str) -> StoreResult<()> {
        fs::remove_file(self.object_path(key)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_put_then_get_round_trips() {
        let temp_dir = tempdir().unwrap();
        let store = LocalObjectStore::new(temp_dir.path().to_path_buf());

        let key = "1700000000000-a1b2c3d4e5f6g.mp3";
        let content = b"this is a test object";

        store.put_object(key, content, "audio/mpeg").await.unwrap();

        let retrieved = store.get_object(key).await.unwrap();
        assert_eq!(retrieved, content);
    }

    #[tokio::test]
    async fn test_distinct_keys_hold_distinct_content() {
        let temp_dir = tempdir().unwrap();
        let store = LocalObjectStore::new(temp_dir.path().to_path_buf());

        store.put_object("first", b"one", "text/plain").await.unwrap();
        store.put_object("second", b"two", "text/plain").await.unwrap();

        assert_eq!(store.get_object("first").await.unwrap(), b"one");
        assert_eq!(store.get_object("second").await.unwrap(), b"two");
    }

    #[tokio::test]
    async fn test_delete_removes_object() {
        let temp_dir = tempdir().unwrap();
        let store = LocalObjectStore::new(temp_dir.path().to_path_buf());

        store.put_object("doomed", b"bytes", "text/plain").await.unwrap();
        store.delete_object("doomed").await.unwrap();

        assert!(store.get_object("doomed").await.is_err());
    }
}
