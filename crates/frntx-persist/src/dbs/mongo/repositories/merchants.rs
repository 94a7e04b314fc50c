use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{bson::doc, Client, Collection};

use crate::error::Result;
use crate::models::{MerchantFileRecord, MerchantPatch, MerchantRecord};

#[derive(Clone)]
pub struct MerchantRepository {
    merchants: Collection<MerchantRecord>,
    files: Collection<MerchantFileRecord>,
}

impl MerchantRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let db = client.database(db_name);
        Self {
            merchants: db.collection("merchants"),
            files: db.collection("files"),
        }
    }

    /// All merchants ordered by company name.
    pub async fn list(&self) -> Result<Vec<MerchantRecord>> {
        let merchants = self
            .merchants
            .find(doc! {})
            .sort(doc! { "company_name": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(merchants)
    }

    pub async fn get(&self, merchant_id: &str) -> Result<Option<MerchantRecord>> {
        Ok(self.merchants.find_one(doc! { "id": merchant_id }).await?)
    }

    pub async fn insert(&self, record: &MerchantRecord) -> Result<()> {
        self.merchants.insert_one(record).await?;
        Ok(())
    }

    pub async fn update(&self, merchant_id: &str, patch: MerchantPatch) -> Result<()> {
        let mut set = doc! { "updated_at": bson::to_bson(&Utc::now())? };
        if let Some(company_name) = patch.company_name {
            set.insert("company_name", company_name);
        }
        if let Some(logo_path) = patch.logo_path {
            set.insert("logo_path", logo_path);
        }
        if let Some(description) = patch.description {
            set.insert("description", description);
        }

        self.merchants
            .update_one(doc! { "id": merchant_id }, doc! { "$set": set })
            .await?;
        Ok(())
    }

    /// Delete a merchant and its file rows.
    pub async fn delete(&self, merchant_id: &str) -> Result<()> {
        self.files
            .delete_many(doc! { "merchant_id": merchant_id })
            .await?;
        self.merchants.delete_one(doc! { "id": merchant_id }).await?;
        Ok(())
    }

    pub async fn list_files(&self, merchant_id: &str) -> Result<Vec<MerchantFileRecord>> {
        let files = self
            .files
            .find(doc! { "merchant_id": merchant_id })
            .await?
            .try_collect()
            .await?;
        Ok(files)
    }

    pub async fn add_file(&self, file: &MerchantFileRecord) -> Result<()> {
        self.files.insert_one(file).await?;
        Ok(())
    }

    pub async fn delete_file(&self, file_id: &str) -> Result<()> {
        self.files.delete_one(doc! { "id": file_id }).await?;
        Ok(())
    }
}
