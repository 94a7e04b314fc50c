use futures::TryStreamExt;
use mongodb::{bson::doc, Client, Collection};

use crate::error::Result;
use crate::models::ThreadRecord;

#[derive(Clone)]
pub struct ThreadMirrorRepository {
    threads: Collection<ThreadRecord>,
}

impl ThreadMirrorRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        Self {
            threads: client.database(db_name).collection("threads"),
        }
    }

    pub async fn insert(&self, record: &ThreadRecord) -> Result<()> {
        self.threads.insert_one(record).await?;
        Ok(())
    }

    /// Threads attached to one assistant, newest first.
    pub async fn list_for_assistant(&self, assistant_id: &str) -> Result<Vec<ThreadRecord>> {
        let records = self
            .threads
            .find(doc! { "assistant_id": assistant_id })
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(records)
    }

    pub async fn delete(&self, thread_id: &str) -> Result<()> {
        self.threads.delete_one(doc! { "id": thread_id }).await?;
        Ok(())
    }
}
