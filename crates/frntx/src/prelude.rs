//! Prelude module for convenient imports
//!
//! Import everything you need with:
//! ```rust
//! use frntx::prelude::*;
//! ```

pub use crate::{
    run_exchange, AssistantsApi, ChatError, ChatMessage, ChatRole, CoordinatorConfig,
    HostedAssistantsClient, MessageRole, MirrorStore, ObjectStore, RunCoordinator, RunEvent,
    RunStatus, ThreadMessage, Transcript,
};
