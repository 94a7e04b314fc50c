use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use frntx_assistants::{MessageRole, ThreadMessage};
use frntx_persist::ThreadRecord;

use crate::{error::ApiResult, state::AppState};

#[derive(Debug, Serialize)]
pub struct ListThreadsResponse {
    pub threads: Vec<ThreadRecord>,
}

pub async fn list_threads(
    State(state): State<Arc<AppState>>,
    Path(assistant_id): Path<String>,
) -> ApiResult<Json<ListThreadsResponse>> {
    let threads = state
        .mirror
        .list_threads_for_assistant(&assistant_id)
        .await?;
    Ok(Json(ListThreadsResponse { threads }))
}

/// Create the thread on the hosted API, then mirror it under the assistant.
pub async fn create_thread(
    State(state): State<Arc<AppState>>,
    Path(assistant_id): Path<String>,
) -> ApiResult<(StatusCode, Json<ThreadRecord>)> {
    let thread = state.assistants.create_thread().await?;
    tracing::info!(thread_id = %thread.id, assistant_id = %assistant_id, "thread created");

    let record = state
        .mirror
        .insert_thread(ThreadRecord::new(&thread.id, &assistant_id))
        .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// Hosted delete first; the mirror row only goes away once the hosted
/// object is gone.
pub async fn delete_thread(
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<String>,
) -> ApiResult<StatusCode> {
    state.assistants.delete_thread(&thread_id).await?;
    state.mirror.delete_thread(&thread_id).await?;

    tracing::info!(thread_id = %thread_id, "thread deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub role: MessageRole,
    pub text: String,
    pub created_at: i64,
}

#[derive(Debug, Serialize)]
pub struct ListMessagesResponse {
    pub messages: Vec<MessageResponse>,
}

/// Thread history in ascending creation order, text parts only.
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<String>,
) -> ApiResult<Json<ListMessagesResponse>> {
    let messages = state.assistants.list_messages(&thread_id).await?;

    let messages = messages.into_iter().map(message_to_response).collect();
    Ok(Json(ListMessagesResponse { messages }))
}

fn message_to_response(message: ThreadMessage) -> MessageResponse {
    let text = message.text();
    MessageResponse {
        id: message.id,
        role: message.role,
        text,
        created_at: message.created_at,
    }
}
