pub mod assistant;
pub mod file;
pub mod message;
pub mod thread;

pub use assistant::{
    Assistant, AssistantTool, CreateAssistant, FileSearchResources, ResponseFormat, ToolResources,
    UpdateAssistant,
};
pub use file::{ModelInfo, StoredFile, VectorFileSummary, VectorStore, VectorStoreFile};
pub use message::{
    Annotation, FilePathRef, ImageFileRef, MessageContent, MessageRole, TextContent, ThreadMessage,
};
pub use thread::{
    RequiredAction, RequiredToolCall, Run, RunError, RunStatus, ThreadObject, ToolOutput,
};
