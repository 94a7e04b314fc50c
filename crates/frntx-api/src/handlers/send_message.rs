use axum::{
    extract::{Query, State},
    response::sse::{Event, Sse},
    response::{IntoResponse, Response},
    Json,
};
use futures::stream::StreamExt;
use serde::Deserialize;
use serde_json::json;
use std::convert::Infallible;
use std::sync::Arc;

use frntx_assistants::MessageRole;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
    pub thread_id: String,
    pub assistant_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SendMessageQuery {
    /// Defaults to true; `?stream=false` switches to the fire-and-poll
    /// variant that answers with the run id.
    #[serde(default = "default_stream")]
    pub stream: bool,
}

fn default_stream() -> bool {
    true
}

/// Send a chat message to an assistant.
///
/// Streaming (default): appends the user message, starts a streamed run and
/// relays its events as SSE. Non-streaming: appends the message, creates the
/// run and immediately answers `{ "run_id": … }` for the caller to poll.
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SendMessageQuery>,
    Json(req): Json<SendMessageRequest>,
) -> ApiResult<Response> {
    if req.content.trim().is_empty() {
        return Err(ApiError::BadRequest("content must not be empty".to_string()));
    }

    if !query.stream {
        return send_message_polled(&state, &req).await;
    }

    let stream = state
        .coordinator
        .stream_message(&req.thread_id, &req.assistant_id, &req.content)
        .await?;

    let sse_stream = stream.map(|event| {
        let sse_event = match event {
            Ok(event) => {
                // The serialized event carries its variant in "type"; reuse
                // it as the SSE event name so clients can subscribe per kind.
                let payload = serde_json::to_value(&event).unwrap_or_else(|_| json!({}));
                let name = payload
                    .get("type")
                    .and_then(|t| t.as_str())
                    .unwrap_or("event")
                    .to_string();
                Event::default().event(name).json_data(&payload)
            }
            Err(e) => {
                tracing::error!("run stream error: {}", e);
                Event::default()
                    .event("error")
                    .json_data(json!({ "error": e.to_string() }))
            }
        };

        Ok::<Event, Infallible>(sse_event.unwrap_or_default())
    });

    Ok(Sse::new(sse_stream).into_response())
}

async fn send_message_polled(state: &AppState, req: &SendMessageRequest) -> ApiResult<Response> {
    state
        .assistants
        .create_message(&req.thread_id, MessageRole::User, req.content.trim())
        .await?;

    let run = state
        .assistants
        .create_run(&req.thread_id, &req.assistant_id)
        .await?;

    tracing::info!(thread_id = %req.thread_id, run_id = %run.id, "run created");
    Ok(Json(json!({ "run_id": run.id })).into_response())
}
