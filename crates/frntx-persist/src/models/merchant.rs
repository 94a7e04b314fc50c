use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mirrored merchant row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantRecord {
    pub id: String,
    pub company_name: String,
    pub logo_path: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMerchant {
    pub company_name: String,
    pub logo_path: Option<String>,
    pub description: Option<String>,
}

impl NewMerchant {
    pub fn into_record(self) -> MerchantRecord {
        let now = Utc::now();
        MerchantRecord {
            id: uuid::Uuid::new_v4().to_string(),
            company_name: self.company_name,
            logo_path: self.logo_path,
            description: self.description,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial merchant update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MerchantPatch {
    pub company_name: Option<String>,
    pub logo_path: Option<String>,
    pub description: Option<String>,
}

/// File attached to a merchant. `url` points at the object store; the bytes
/// themselves never live in the relational mirror.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantFileRecord {
    pub id: String,
    pub merchant_id: String,
    pub name: String,
    pub url: String,
    pub size: u64,
    pub mime_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MerchantFileRecord {
    pub fn new(
        merchant_id: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
        size: u64,
        mime_type: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            merchant_id: merchant_id.into(),
            name: name.into(),
            url: url.into(),
            size,
            mime_type: mime_type.into(),
            created_at: now,
            updated_at: now,
        }
    }
}
