use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mirrored assistant row, kept for listing only.
///
/// The hosted API owns the assistant; this copy may drift and is refreshed
/// last-write-wins on explicit update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantRecord {
    pub id: String,
    pub assistant_id: String,
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub model: String,
    pub instructions: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AssistantRecord {
    pub fn new(assistant_id: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            assistant_id: assistant_id.into(),
            user_id: None,
            name: None,
            description: None,
            model: model.into(),
            instructions: None,
            created_at: Utc::now(),
        }
    }
}
