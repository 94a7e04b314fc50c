use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use frntx_assistants::AssistantsError;
use frntx_chat::ChatError;
use frntx_persist::PersistError;
use frntx_storage::StorageError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Merchant not found: {0}")]
    MerchantNotFound(String),

    #[error("Assistant not found: {0}")]
    AssistantNotFound(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Client not found: {0}")]
    ClientNotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Assistants API error: {0}")]
    Assistants(#[from] AssistantsError),

    #[error("Chat error: {0}")]
    Chat(#[from] ChatError),

    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MerchantNotFound(_)
            | ApiError::AssistantNotFound(_)
            | ApiError::FileNotFound(_)
            | ApiError::ClientNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Chat(ChatError::EmptyMessage) => {
                (StatusCode::BAD_REQUEST, ChatError::EmptyMessage.to_string())
            }
            ApiError::Assistants(AssistantsError::NotFound(ref what)) => {
                (StatusCode::NOT_FOUND, format!("Not found: {}", what))
            }
            ApiError::Assistants(ref e) => {
                tracing::error!("Assistants API error: {}", e);
                (StatusCode::BAD_GATEWAY, "Upstream API error".to_string())
            }
            ApiError::Chat(ref e) => {
                tracing::error!("Chat error: {}", e);
                (StatusCode::BAD_GATEWAY, "Assistant run failed".to_string())
            }
            ApiError::Persist(PersistError::MerchantNotFound(id)) => {
                (StatusCode::NOT_FOUND, format!("Merchant not found: {}", id))
            }
            ApiError::Persist(ref e) => {
                tracing::error!("Persistence error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
            ApiError::Storage(StorageError::NotFound(path)) => {
                (StatusCode::NOT_FOUND, format!("Object not found: {}", path))
            }
            ApiError::Storage(ref e) => {
                tracing::error!("Storage error: {}", e);
                (StatusCode::BAD_GATEWAY, "Object storage error".to_string())
            }
            ApiError::Internal => {
                tracing::error!("Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
