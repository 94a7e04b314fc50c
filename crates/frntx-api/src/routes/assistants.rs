use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use frntx_assistants::{
    list_vector_store_files, remove_file_from_vector_store, Assistant, CreateAssistant,
    UpdateAssistant, VectorFileSummary,
};
use frntx_persist::AssistantRecord;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CreateAssistantRequest {
    pub model: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListAssistantsResponse {
    pub assistants: Vec<AssistantRecord>,
}

/// Mirrored listing; no hosted call so the page stays fast.
pub async fn list_assistants(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ListAssistantsResponse>> {
    let assistants = state.mirror.list_assistants().await?;
    Ok(Json(ListAssistantsResponse { assistants }))
}

/// Create on the hosted API first, then mirror. A mirror failure after the
/// hosted create leaves an unlisted hosted assistant; the error is surfaced
/// so the operator can retry or clean up.
pub async fn create_assistant(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateAssistantRequest>,
) -> ApiResult<(StatusCode, Json<AssistantRecord>)> {
    if req.model.trim().is_empty() {
        return Err(ApiError::BadRequest("model is required".to_string()));
    }

    let mut create = CreateAssistant::new(&req.model).with_default_tools();
    if let Some(name) = &req.name {
        create = create.name(name);
    }
    if let Some(description) = &req.description {
        create = create.description(description);
    }
    if let Some(instructions) = &req.instructions {
        create = create.instructions(instructions);
    }

    let assistant = state.assistants.create_assistant(create).await?;
    tracing::info!(assistant_id = %assistant.id, "hosted assistant created");

    let mut record = AssistantRecord::new(&assistant.id, &assistant.model);
    record.name = assistant.name.clone();
    record.description = assistant.description.clone();
    record.instructions = assistant.instructions.clone();

    let record = state.mirror.insert_assistant(record).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn get_assistant(
    State(state): State<Arc<AppState>>,
    Path(assistant_id): Path<String>,
) -> ApiResult<Json<Assistant>> {
    let assistant = state.assistants.retrieve_assistant(&assistant_id).await?;
    Ok(Json(assistant))
}

#[derive(Debug, Deserialize)]
pub struct UpdateAssistantRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

/// Hosted update first, then refresh the mirror row from the hosted reply.
pub async fn update_assistant(
    State(state): State<Arc<AppState>>,
    Path(assistant_id): Path<String>,
    Json(req): Json<UpdateAssistantRequest>,
) -> ApiResult<Json<Assistant>> {
    let update = UpdateAssistant {
        name: req.name,
        description: req.description,
        instructions: req.instructions,
        model: req.model,
        ..Default::default()
    };

    let assistant = state
        .assistants
        .update_assistant(&assistant_id, update)
        .await?;

    // Rewrite the mirror row in place, keeping its original created_at so
    // listing order is stable across updates.
    let rows = state.mirror.list_assistants().await?;
    if let Some(existing) = rows.into_iter().find(|r| r.assistant_id == assistant_id) {
        let mut refreshed = existing;
        refreshed.name = assistant.name.clone();
        refreshed.description = assistant.description.clone();
        refreshed.instructions = assistant.instructions.clone();
        refreshed.model = assistant.model.clone();

        state.mirror.delete_assistant(&assistant_id).await?;
        state.mirror.insert_assistant(refreshed).await?;
    }

    Ok(Json(assistant))
}

/// Hosted delete first, mirror second; threads attached to the assistant
/// are dropped from the mirror as well.
pub async fn delete_assistant(
    State(state): State<Arc<AppState>>,
    Path(assistant_id): Path<String>,
) -> ApiResult<StatusCode> {
    state.assistants.delete_assistant(&assistant_id).await?;

    for thread in state
        .mirror
        .list_threads_for_assistant(&assistant_id)
        .await?
    {
        state.mirror.delete_thread(&thread.id).await?;
    }
    state.mirror.delete_assistant(&assistant_id).await?;

    tracing::info!(assistant_id = %assistant_id, "assistant deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize)]
pub struct AssistantFilesResponse {
    pub files: Vec<VectorFileSummary>,
}

pub async fn list_assistant_files(
    State(state): State<Arc<AppState>>,
    Path(assistant_id): Path<String>,
) -> ApiResult<Json<AssistantFilesResponse>> {
    let files = list_vector_store_files(state.assistants.as_ref(), &assistant_id).await?;
    Ok(Json(AssistantFilesResponse { files }))
}

pub async fn delete_assistant_file(
    State(state): State<Arc<AppState>>,
    Path((assistant_id, file_id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    remove_file_from_vector_store(state.assistants.as_ref(), &assistant_id, &file_id).await?;
    tracing::info!(assistant_id = %assistant_id, file_id = %file_id, "vector store file removed");
    Ok(StatusCode::NO_CONTENT)
}
