use async_trait::async_trait;
use mongodb::Client;

use crate::dbs::mongo::repositories::{
    AssistantMirrorRepository, ClientRepository, MerchantRepository, ThreadMirrorRepository,
};
use crate::error::{PersistError, Result};
use crate::models::{
    AssistantRecord, ClientRecord, MerchantFileRecord, MerchantPatch, MerchantRecord, NewMerchant,
    ThreadRecord,
};
use crate::trait_client::MirrorStore;

/// MongoDB-backed [`MirrorStore`].
///
/// One collection per aggregate, string ids matching the hosted objects so
/// lookups never need ObjectId conversion.
#[derive(Clone)]
pub struct MongoMirrorStore {
    merchants: MerchantRepository,
    assistants: AssistantMirrorRepository,
    threads: ThreadMirrorRepository,
    clients: ClientRepository,
}

impl MongoMirrorStore {
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;

        tracing::info!(db = db_name, "connected to mongodb");

        Ok(Self {
            merchants: MerchantRepository::new(&client, db_name),
            assistants: AssistantMirrorRepository::new(&client, db_name),
            threads: ThreadMirrorRepository::new(&client, db_name),
            clients: ClientRepository::new(&client, db_name),
        })
    }
}

#[async_trait]
impl MirrorStore for MongoMirrorStore {
    async fn list_merchants(&self) -> Result<Vec<MerchantRecord>> {
        self.merchants.list().await
    }

    async fn get_merchant(&self, merchant_id: &str) -> Result<Option<MerchantRecord>> {
        self.merchants.get(merchant_id).await
    }

    async fn create_merchant(&self, merchant: NewMerchant) -> Result<MerchantRecord> {
        let record = merchant.into_record();
        self.merchants.insert(&record).await?;
        Ok(record)
    }

    async fn update_merchant(&self, merchant_id: &str, patch: MerchantPatch) -> Result<()> {
        if self.merchants.get(merchant_id).await?.is_none() {
            return Err(PersistError::MerchantNotFound(merchant_id.to_string()));
        }
        self.merchants.update(merchant_id, patch).await
    }

    async fn delete_merchant(&self, merchant_id: &str) -> Result<()> {
        self.merchants.delete(merchant_id).await
    }

    async fn list_merchant_files(&self, merchant_id: &str) -> Result<Vec<MerchantFileRecord>> {
        self.merchants.list_files(merchant_id).await
    }

    async fn add_merchant_file(&self, file: MerchantFileRecord) -> Result<MerchantFileRecord> {
        self.merchants.add_file(&file).await?;
        Ok(file)
    }

    async fn delete_merchant_file(&self, file_id: &str) -> Result<()> {
        self.merchants.delete_file(file_id).await
    }

    async fn insert_assistant(&self, record: AssistantRecord) -> Result<AssistantRecord> {
        self.assistants.insert(&record).await?;
        Ok(record)
    }

    async fn list_assistants(&self) -> Result<Vec<AssistantRecord>> {
        self.assistants.list().await
    }

    async fn delete_assistant(&self, assistant_id: &str) -> Result<()> {
        self.assistants.delete(assistant_id).await
    }

    async fn insert_thread(&self, record: ThreadRecord) -> Result<ThreadRecord> {
        self.threads.insert(&record).await?;
        Ok(record)
    }

    async fn list_threads_for_assistant(&self, assistant_id: &str) -> Result<Vec<ThreadRecord>> {
        self.threads.list_for_assistant(assistant_id).await
    }

    async fn delete_thread(&self, thread_id: &str) -> Result<()> {
        self.threads.delete(thread_id).await
    }

    async fn list_clients(&self) -> Result<Vec<ClientRecord>> {
        self.clients.list().await
    }

    async fn get_client(&self, client_id: &str) -> Result<Option<ClientRecord>> {
        self.clients.get(client_id).await
    }
}
