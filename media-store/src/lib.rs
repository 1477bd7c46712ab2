pub mod local_store;
pub mod s3_store;
pub mod store;

pub use local_store::LocalObjectStore;
pub use s3_store::S3ObjectStore;
pub use store::{ObjectStore, ObjectStores, StoreResult};
