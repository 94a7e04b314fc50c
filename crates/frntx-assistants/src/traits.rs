use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;
use crate::streaming::RunEventStream;
use crate::types::{
    Assistant, CreateAssistant, MessageRole, ModelInfo, Run, StoredFile, ThreadMessage,
    ThreadObject, ToolOutput, UpdateAssistant, VectorStore, VectorStoreFile,
};

/// The hosted Assistants API surface consumed by this system.
///
/// Everything network-facing goes through this trait so tests can substitute
/// a fake; production code holds an `Arc<dyn AssistantsApi>` injected at
/// construction, never a module-level client.
#[async_trait]
pub trait AssistantsApi: Send + Sync {
    // Assistants
    async fn create_assistant(&self, req: CreateAssistant) -> Result<Assistant>;
    async fn list_assistants(&self) -> Result<Vec<Assistant>>;
    async fn retrieve_assistant(&self, assistant_id: &str) -> Result<Assistant>;
    async fn update_assistant(&self, assistant_id: &str, req: UpdateAssistant)
        -> Result<Assistant>;
    async fn delete_assistant(&self, assistant_id: &str) -> Result<()>;

    // Threads
    async fn create_thread(&self) -> Result<ThreadObject>;
    async fn retrieve_thread(&self, thread_id: &str) -> Result<ThreadObject>;
    async fn delete_thread(&self, thread_id: &str) -> Result<()>;

    // Messages
    async fn create_message(
        &self,
        thread_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<ThreadMessage>;

    /// Messages for a thread in ascending creation order.
    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>>;

    // Runs
    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run>;
    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run>;
    async fn stream_run(&self, thread_id: &str, assistant_id: &str) -> Result<RunEventStream>;
    async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: Vec<ToolOutput>,
    ) -> Result<RunEventStream>;

    // Vector stores
    async fn create_vector_store(&self, name: &str) -> Result<VectorStore>;
    async fn update_vector_store(&self, store_id: &str, name: &str) -> Result<VectorStore>;
    async fn list_vector_stores(&self) -> Result<Vec<VectorStore>>;
    async fn create_vector_store_file(
        &self,
        store_id: &str,
        file_id: &str,
    ) -> Result<VectorStoreFile>;
    async fn list_vector_store_files(&self, store_id: &str) -> Result<Vec<VectorStoreFile>>;
    async fn retrieve_vector_store_file(
        &self,
        store_id: &str,
        file_id: &str,
    ) -> Result<VectorStoreFile>;
    async fn delete_vector_store_file(&self, store_id: &str, file_id: &str) -> Result<()>;

    // Files
    async fn upload_file(&self, filename: &str, bytes: Vec<u8>) -> Result<StoredFile>;
    async fn list_files(&self) -> Result<Vec<StoredFile>>;
    async fn retrieve_file(&self, file_id: &str) -> Result<StoredFile>;
    async fn file_content(&self, file_id: &str) -> Result<Bytes>;

    // Models
    async fn list_models(&self) -> Result<Vec<ModelInfo>>;
}
