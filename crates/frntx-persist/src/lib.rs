//! Persistence mirror for the admin dashboard: merchants, uploaded files,
//! assistants, threads and client accounts, stored alongside the hosted API
//! objects they shadow.

pub mod dbs;
pub mod error;
pub mod models;
pub mod reconcile;
pub mod trait_client;

pub use error::{PersistError, Result};
pub use models::{
    AssistantRecord, ClientRecord, MerchantFileRecord, MerchantPatch, MerchantRecord, NewMerchant,
    ThreadRecord,
};
pub use reconcile::{diff_merchant_files, reconcile_merchant_files, FileChanges};
pub use trait_client::MirrorStore;

#[cfg(feature = "mongodb")]
pub use dbs::mongo::MongoMirrorStore;
