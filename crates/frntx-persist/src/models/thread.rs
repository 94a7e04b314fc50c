use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Mirrored thread row. The id is the hosted thread id; the mirror exists
/// only so threads can be listed per assistant without a hosted call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadRecord {
    pub id: String,
    pub assistant_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

impl ThreadRecord {
    pub fn new(thread_id: impl Into<String>, assistant_id: impl Into<String>) -> Self {
        Self {
            id: thread_id.into(),
            assistant_id: assistant_id.into(),
            created_at: Utc::now(),
            metadata: HashMap::new(),
        }
    }
}
