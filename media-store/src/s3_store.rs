use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Builder;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;

use crate::store::{ObjectStore, StoreResult};

/// An `ObjectStore` implementation backed by an S3-compatible bucket
/// (AWS S3, MinIO, Cloudflare R2).
#[derive(Clone, Debug)]
pub struct S3ObjectStore {
    client: S3Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Creates a new `S3ObjectStore` from an already-configured client.
    pub fn new(client: S3Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Loads AWS configuration from the environment. A custom endpoint
    /// (e.g. a local MinIO server) forces path-style addressing.
    pub async fn connect(bucket: String, endpoint_url: Option<&str>) -> Self {
        let region_provider = RegionProviderChain::default_provider().or_else("us-east-1");
        let base_config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await;

        let client = match endpoint_url {
            Some(endpoint) => {
                let config = Builder::from(&base_config)
                    .endpoint_url(endpoint)
                    .force_path_style(true) // MinIO requires path-style
                    .build();
                S3Client::from_conf(config)
            }
            None => S3Client::new(&base_config),
        };

        Self { client, bucket }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(&self, key: &str, data: &[u8], content_type: &str) -> StoreResult<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data.to_vec()))
            .send()
            .await?;
        Ok(())
    }

    async fn get_object(&self, key: &str) -> StoreResult<Vec<u8>> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await?;
        let data = resp.body.collect().await?.into_bytes().to_vec();
        Ok(data)
    }

    async fn delete_object(&self, key: &str) -> StoreResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await?;
        Ok(())
    }
}
