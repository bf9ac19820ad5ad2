//! S3-backed blob storage.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use bytes::Bytes;
use tracing::debug;

use crate::error::StorageError;

use super::{content_type_for, object_key, BlobStorage};

/// Blob storage backed by S3 or an S3-compatible service (MinIO, GCS, ...).
#[derive(Clone)]
pub struct S3BlobStorage {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl S3BlobStorage {
    /// Create a new storage over the given bucket.
    ///
    /// `public_base_url` is the prefix under which stored objects are
    /// publicly fetchable, e.g. `https://my-bucket.s3.us-east-1.amazonaws.com`
    /// or a CDN origin.
    pub fn new(client: Client, bucket: String, public_base_url: String) -> Self {
        Self {
            client,
            bucket,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Probe the bucket to verify credentials and reachability.
    pub async fn check_connection(&self) -> Result<(), StorageError> {
        self.client
            .list_objects_v2()
            .bucket(&self.bucket)
            .max_keys(1)
            .send()
            .await
            .map_err(|e| map_s3_error(e.to_string()))?;
        Ok(())
    }
}

fn map_s3_error(message: String) -> StorageError {
    if message.contains("AccessDenied") || message.contains("access denied") {
        StorageError::PermissionDenied(message)
    } else if message.contains("dispatch failure") || message.contains("connection") {
        StorageError::Connection(message)
    } else {
        StorageError::Backend(message)
    }
}

#[async_trait]
impl BlobStorage for S3BlobStorage {
    async fn store(&self, data: Bytes, original_filename: &str) -> Result<String, StorageError> {
        let key = object_key(original_filename);
        let content_type = content_type_for(&key);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(content_type)
            .body(data.into())
            .send()
            .await
            .map_err(|e| map_s3_error(e.to_string()))?;

        debug!(bucket = %self.bucket, key = %key, "stored blob");
        Ok(format!("{}/{}", self.public_base_url, key))
    }
}

/// Create an S3 client with optional custom endpoint and region.
///
/// Pass a custom endpoint for S3-compatible services like MinIO; path-style
/// addressing is forced in that case. Pass `None` for AWS S3.
pub async fn create_s3_client(endpoint_url: Option<&str>, region: &str) -> Client {
    let region = aws_config::Region::new(region.to_string());
    let mut config_loader =
        aws_config::defaults(aws_config::BehaviorVersion::latest()).region(region);

    if let Some(endpoint) = endpoint_url {
        config_loader = config_loader.endpoint_url(endpoint);
    }

    let sdk_config = config_loader.load().await;

    let s3_config = if endpoint_url.is_some() {
        aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build()
    } else {
        aws_sdk_s3::config::Builder::from(&sdk_config).build()
    };

    Client::from_conf(s3_config)
}
