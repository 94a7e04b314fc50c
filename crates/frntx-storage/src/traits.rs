use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One entry from a bucket listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectEntry {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub metadata: Option<ObjectMetadata>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectMetadata {
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default, rename = "mimetype")]
    pub mime_type: Option<String>,
}

/// Bucket-scoped object operations.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload `bytes` at `path`. Fails if an object already exists there.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<String>;

    async fn download(&self, bucket: &str, path: &str) -> Result<Bytes>;

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<()>;

    async fn list(&self, bucket: &str) -> Result<Vec<ObjectEntry>>;

    /// Public URL for an object. Pure, no network.
    fn public_url(&self, bucket: &str, path: &str) -> String;
}
