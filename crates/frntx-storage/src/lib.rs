//! Hosted object storage client for uploaded merchant assets.

pub mod client;
pub mod error;
pub mod traits;

pub use client::{unique_object_name, HttpObjectStore};
pub use error::{Result, StorageError};
pub use traits::{ObjectEntry, ObjectMetadata, ObjectStore};
