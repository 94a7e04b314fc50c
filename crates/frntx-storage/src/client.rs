use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use serde_json::json;

use crate::error::{Result, StorageError};
use crate::traits::{ObjectEntry, ObjectStore};

/// Client for a Supabase-storage-style REST surface.
///
/// Objects live under `{base_url}/object/{bucket}/{path}`; public objects
/// are served from `{base_url}/object/public/{bucket}/{path}`.
pub struct HttpObjectStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpObjectStore {
    pub fn new(base_url: impl Into<String>, service_key: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {}", service_key))
            .map_err(|_| StorageError::Api {
                status: 0,
                message: "service key contains invalid header characters".to_string(),
            })?;
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn object_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/object/{}/{}", self.base_url, bucket, path)
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        if status == StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound(message));
        }
        Err(StorageError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<String> {
        tracing::debug!(bucket, path, size = bytes.len(), "uploading object");

        let response = self
            .client
            .post(self.object_url(bucket, path))
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;
        Self::check(response).await?;

        Ok(path.to_string())
    }

    async fn download(&self, bucket: &str, path: &str) -> Result<Bytes> {
        let response = self
            .client
            .get(self.object_url(bucket, path))
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.bytes().await?)
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<()> {
        if paths.is_empty() {
            return Ok(());
        }
        tracing::debug!(bucket, count = paths.len(), "removing objects");

        let response = self
            .client
            .delete(format!("{}/object/{}", self.base_url, bucket))
            .json(&json!({ "prefixes": paths }))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn list(&self, bucket: &str) -> Result<Vec<ObjectEntry>> {
        let response = self
            .client
            .post(format!("{}/object/list/{}", self.base_url, bucket))
            .json(&json!({ "prefix": "" }))
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/object/public/{}/{}", self.base_url, bucket, path)
    }
}

/// Collision-free object name that keeps the original extension, so the
/// served content type stays guessable from the path.
pub fn unique_object_name(original: &str) -> String {
    let id = uuid::Uuid::new_v4();
    match original.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() && !ext.contains('/') => format!("{}.{}", id, ext),
        _ => id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_url_joins_base_bucket_and_path() {
        let store = HttpObjectStore::new("https://store.example/storage/v1/", "key").unwrap();
        assert_eq!(
            store.public_url("logos", "merchants/a.png"),
            "https://store.example/storage/v1/object/public/logos/merchants/a.png"
        );
    }

    #[test]
    fn unique_name_keeps_extension() {
        let name = unique_object_name("report.final.pdf");
        assert!(name.ends_with(".pdf"));
        assert_ne!(name, "report.final.pdf");
    }

    #[test]
    fn unique_name_without_extension_is_bare_uuid() {
        let name = unique_object_name("README");
        assert!(!name.contains('.'));
        assert_eq!(name.len(), 36);
    }

    #[test]
    fn two_unique_names_differ() {
        assert_ne!(unique_object_name("a.png"), unique_object_name("a.png"));
    }
}
