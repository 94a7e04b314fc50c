use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// File uploaded to the hosted API (not the object store).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredFile {
    pub id: String,
    pub filename: String,
    pub bytes: u64,
    pub purpose: String,
    pub created_at: i64,
}

/// Hosted collection of embedded documents used by file search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorStore {
    pub id: String,
    pub name: Option<String>,
    pub created_at: i64,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

/// Membership record of a file inside a vector store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorStoreFile {
    pub id: String,
    pub vector_store_id: String,
    pub status: String,
    #[serde(default)]
    pub usage_bytes: u64,
    pub created_at: i64,
}

/// Joined view used by the file listing UI: vector-store status plus the
/// filename from the file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorFileSummary {
    pub file_id: String,
    pub filename: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
}
