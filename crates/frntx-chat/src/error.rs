use frntx_assistants::{AssistantsError, RunStatus};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Message text must not be empty")]
    EmptyMessage,

    #[error("Run ended as {status:?}: {message:?}")]
    RunUnsuccessful {
        status: RunStatus,
        message: Option<String>,
    },

    #[error("Run completed but no assistant reply was found")]
    NoAssistantReply,

    #[error("Run did not reach a terminal status within the poll budget")]
    PollLimitReached,

    #[error("Assistants API error: {0}")]
    Api(#[from] AssistantsError),
}

pub type Result<T> = std::result::Result<T, ChatError>;
