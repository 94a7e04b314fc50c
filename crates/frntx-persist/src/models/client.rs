use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Staff-facing client row (read-only in this system).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company_id: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}
