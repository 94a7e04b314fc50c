use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    AssistantRecord, ClientRecord, MerchantFileRecord, MerchantPatch, MerchantRecord, NewMerchant,
    ThreadRecord,
};

/// Table-style operations over the mirrored records.
///
/// Backends provide select/insert/update/delete with equality filters and
/// the fixed orderings the listing pages need.
#[async_trait]
pub trait MirrorStore: Send + Sync {
    // Merchants (ordered by company name)
    async fn list_merchants(&self) -> Result<Vec<MerchantRecord>>;
    async fn get_merchant(&self, merchant_id: &str) -> Result<Option<MerchantRecord>>;
    async fn create_merchant(&self, merchant: NewMerchant) -> Result<MerchantRecord>;
    async fn update_merchant(&self, merchant_id: &str, patch: MerchantPatch) -> Result<()>;
    async fn delete_merchant(&self, merchant_id: &str) -> Result<()>;

    // Merchant files
    async fn list_merchant_files(&self, merchant_id: &str) -> Result<Vec<MerchantFileRecord>>;
    async fn add_merchant_file(&self, file: MerchantFileRecord) -> Result<MerchantFileRecord>;
    async fn delete_merchant_file(&self, file_id: &str) -> Result<()>;

    // Assistants mirror (newest first)
    async fn insert_assistant(&self, record: AssistantRecord) -> Result<AssistantRecord>;
    async fn list_assistants(&self) -> Result<Vec<AssistantRecord>>;
    async fn delete_assistant(&self, assistant_id: &str) -> Result<()>;

    // Threads mirror (newest first)
    async fn insert_thread(&self, record: ThreadRecord) -> Result<ThreadRecord>;
    async fn list_threads_for_assistant(&self, assistant_id: &str) -> Result<Vec<ThreadRecord>>;
    async fn delete_thread(&self, thread_id: &str) -> Result<()>;

    // Clients
    async fn list_clients(&self) -> Result<Vec<ClientRecord>>;
    async fn get_client(&self, client_id: &str) -> Result<Option<ClientRecord>>;
}
