use futures::TryStreamExt;
use mongodb::{bson::doc, Client, Collection};

use crate::error::Result;
use crate::models::ClientRecord;

#[derive(Clone)]
pub struct ClientRepository {
    clients: Collection<ClientRecord>,
}

impl ClientRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        Self {
            clients: client.database(db_name).collection("clients"),
        }
    }

    pub async fn list(&self) -> Result<Vec<ClientRecord>> {
        let records = self
            .clients
            .find(doc! {})
            .sort(doc! { "last_name": 1, "first_name": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(records)
    }

    pub async fn get(&self, client_id: &str) -> Result<Option<ClientRecord>> {
        Ok(self.clients.find_one(doc! { "id": client_id }).await?)
    }
}
