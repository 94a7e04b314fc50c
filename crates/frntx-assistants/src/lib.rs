pub mod client;
pub mod error;
pub mod events;
pub mod streaming;
pub mod traits;
pub mod types;
pub mod vector;

pub use client::HostedAssistantsClient;
pub use error::AssistantsError;
pub use events::RunEvent;
pub use streaming::{parse_run_event_stream, LineBuffer, RunEventDecoder, RunEventStream};
pub use traits::AssistantsApi;
pub use types::{
    Annotation, Assistant, CreateAssistant, MessageContent, MessageRole, ModelInfo, Run, RunStatus,
    StoredFile, TextContent, ThreadMessage, ThreadObject, ToolOutput, ToolResources,
    UpdateAssistant, VectorFileSummary, VectorStore, VectorStoreFile,
};
pub use vector::{
    add_file_to_vector_store, ensure_vector_store, list_vector_store_files,
    remove_file_from_vector_store,
};
