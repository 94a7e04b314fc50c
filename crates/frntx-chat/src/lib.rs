pub mod coordinator;
pub mod error;
pub mod timer;
pub mod transcript;

pub use coordinator::{run_exchange, CoordinatorConfig, RunCoordinator};
pub use error::ChatError;
pub use timer::{RunTimer, TokioTimer};
pub use transcript::{ChatMessage, ChatRole, RunFailure, Transcript};
