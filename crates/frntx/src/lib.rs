//! # FRNT X
//!
//! Toolkit behind the merchant admin dashboard: a typed client for a hosted
//! LLM Assistants API, a chat-run coordinator with polling and streaming
//! variants, mirrored records for merchants/assistants/threads, and an
//! object-storage client for uploaded assets.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use frntx::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let api: Arc<dyn AssistantsApi> = Arc::new(HostedAssistantsClient::new(
//!         std::env::var("OPENAI_API_KEY")?,
//!     )?);
//!
//!     let coordinator = RunCoordinator::new(api.clone());
//!
//!     let thread = api.create_thread().await?;
//!     let reply = coordinator
//!         .submit_message(&thread.id, "asst_123", "Hello!")
//!         .await?;
//!
//!     println!("{}", reply.text());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`frntx-assistants`**: typed hosted-API client with SSE run streaming
//! - **`frntx-chat`**: run coordination and transcript reconciliation
//! - **`frntx-persist`**: mirrored records behind a store trait
//! - **`frntx-storage`**: hosted object storage client

pub mod prelude;

pub use frntx_assistants::{
    add_file_to_vector_store, ensure_vector_store, list_vector_store_files,
    parse_run_event_stream, remove_file_from_vector_store, Annotation, Assistant, AssistantsApi,
    AssistantsError, CreateAssistant, HostedAssistantsClient, MessageContent, MessageRole,
    ModelInfo, Run, RunEvent, RunEventStream, RunStatus, StoredFile, ThreadMessage, ThreadObject,
    UpdateAssistant, VectorFileSummary, VectorStore,
};

pub use frntx_chat::{
    run_exchange, ChatError, ChatMessage, ChatRole, CoordinatorConfig, RunCoordinator, RunTimer,
    TokioTimer, Transcript,
};

pub use frntx_persist::{
    diff_merchant_files, reconcile_merchant_files, AssistantRecord, ClientRecord, FileChanges,
    MerchantFileRecord, MerchantPatch, MerchantRecord, MirrorStore, NewMerchant, PersistError,
    ThreadRecord,
};

#[cfg(feature = "mongodb")]
pub use frntx_persist::MongoMirrorStore;

pub use frntx_storage::{
    unique_object_name, HttpObjectStore, ObjectEntry, ObjectStore, StorageError,
};
