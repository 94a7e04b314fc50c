//! Vector-store conveniences over the raw API surface.
//!
//! An assistant gets at most one file-search vector store; these helpers
//! create it lazily and keep the file listing joined with file metadata.

use crate::error::Result;
use crate::traits::AssistantsApi;
use crate::types::{ToolResources, UpdateAssistant, VectorFileSummary};

const DEFAULT_STORE_NAME: &str = "assistant-vector-store";

/// Return the assistant's file-search vector store id, creating and
/// attaching one when the assistant has none.
pub async fn ensure_vector_store(api: &dyn AssistantsApi, assistant_id: &str) -> Result<String> {
    let assistant = api.retrieve_assistant(assistant_id).await?;

    if let Some(store_id) = assistant.file_search_store() {
        return Ok(store_id.to_string());
    }

    let store = api.create_vector_store(DEFAULT_STORE_NAME).await?;
    tracing::info!(assistant_id, store_id = %store.id, "created vector store for assistant");

    api.update_assistant(
        assistant_id,
        UpdateAssistant::new().tool_resources(ToolResources::with_file_search_store(&store.id)),
    )
    .await?;

    Ok(store.id)
}

/// Upload a file to the hosted API and register it with the assistant's
/// vector store. Returns the hosted file id.
pub async fn add_file_to_vector_store(
    api: &dyn AssistantsApi,
    assistant_id: &str,
    filename: &str,
    bytes: Vec<u8>,
) -> Result<String> {
    let store_id = ensure_vector_store(api, assistant_id).await?;
    let file = api.upload_file(filename, bytes).await?;
    api.create_vector_store_file(&store_id, &file.id).await?;
    Ok(file.id)
}

/// List the assistant's vector-store files with filename and ingest status.
pub async fn list_vector_store_files(
    api: &dyn AssistantsApi,
    assistant_id: &str,
) -> Result<Vec<VectorFileSummary>> {
    let store_id = ensure_vector_store(api, assistant_id).await?;
    let entries = api.list_vector_store_files(&store_id).await?;

    let mut summaries = Vec::with_capacity(entries.len());
    for entry in entries {
        let file = api.retrieve_file(&entry.id).await?;
        summaries.push(VectorFileSummary {
            file_id: entry.id,
            filename: file.filename,
            status: entry.status,
        });
    }

    Ok(summaries)
}

/// Detach a file from the assistant's vector store.
pub async fn remove_file_from_vector_store(
    api: &dyn AssistantsApi,
    assistant_id: &str,
    file_id: &str,
) -> Result<()> {
    let store_id = ensure_vector_store(api, assistant_id).await?;
    api.delete_vector_store_file(&store_id, file_id).await
}
