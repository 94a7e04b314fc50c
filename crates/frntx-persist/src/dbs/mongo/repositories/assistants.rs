use futures::TryStreamExt;
use mongodb::{bson::doc, Client, Collection};

use crate::error::Result;
use crate::models::AssistantRecord;

#[derive(Clone)]
pub struct AssistantMirrorRepository {
    assistants: Collection<AssistantRecord>,
}

impl AssistantMirrorRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        Self {
            assistants: client.database(db_name).collection("assistants"),
        }
    }

    pub async fn insert(&self, record: &AssistantRecord) -> Result<()> {
        self.assistants.insert_one(record).await?;
        Ok(())
    }

    /// Newest first, matching the hosted listing.
    pub async fn list(&self) -> Result<Vec<AssistantRecord>> {
        let records = self
            .assistants
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(records)
    }

    pub async fn delete(&self, assistant_id: &str) -> Result<()> {
        self.assistants
            .delete_one(doc! { "assistant_id": assistant_id })
            .await?;
        Ok(())
    }
}
