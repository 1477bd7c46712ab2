use std::error::Error;

use async_trait::async_trait;

use crate::local_store::LocalObjectStore;
use crate::s3_store::S3ObjectStore;

pub type StoreResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// Trait for storing and fetching objects by their keys.
///
/// The upload path only ever calls `put_object`; `get_object` and
/// `delete_object` exist for verification in tests and operational tooling.
#[async_trait]
pub trait ObjectStore {
    /// Stores an object under its key, tagging it with a content type.
    async fn put_object(&self, key: &str, data: &[u8], content_type: &str) -> StoreResult<()>;

    /// Retrieves an object by its key.
    async fn get_object(&self, key: &str) -> StoreResult<Vec<u8>>;

    async fn delete_object(&self, key: &str) -> StoreResult<()>;
}

#[derive(Debug, Clone)]
pub enum ObjectStores {
    Local(LocalObjectStore),
    S3(S3ObjectStore),
}

impl ObjectStores {
    /// Returns a reference to the inner value as a trait object.
    pub fn as_trait(&self) -> &dyn ObjectStore {
        match self {
            ObjectStores::Local(a) => a,
            ObjectStores::S3(b) => b,
        }
    }
}
