use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use frntx_assistants::add_file_to_vector_store;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

/// Download a hosted file as an attachment.
///
/// This is the target of the `/api/files/{file_id}` links produced by
/// annotation rewriting in chat transcripts.
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let file = state.assistants.retrieve_file(&file_id).await?;
    let bytes = state.assistants.file_content(&file_id).await?;

    let mut headers = HeaderMap::new();
    let disposition = format!("attachment; filename=\"{}\"", sanitize(&file.filename));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
    );
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/octet-stream"),
    );

    Ok((headers, bytes))
}

fn sanitize(filename: &str) -> String {
    filename
        .chars()
        .filter(|c| !c.is_control() && *c != '"' && *c != '\\')
        .collect()
}

#[derive(Debug, Serialize)]
pub struct UploadFileResponse {
    pub file_id: String,
}

/// Multipart upload into an assistant's vector store.
///
/// Expects an `assistant_id` text field and a `file` field; the file lands
/// on the hosted API and is attached to the assistant's single file-search
/// store.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<UploadFileResponse>)> {
    let mut assistant_id: Option<String> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        match field.name() {
            Some("assistant_id") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Invalid assistant_id: {}", e)))?;
                assistant_id = Some(value);
            }
            Some("file") => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| ApiError::BadRequest("file field needs a filename".to_string()))?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;
                file = Some((filename, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let assistant_id =
        assistant_id.ok_or_else(|| ApiError::BadRequest("assistant_id is required".to_string()))?;
    let (filename, bytes) =
        file.ok_or_else(|| ApiError::BadRequest("file is required".to_string()))?;

    if bytes.is_empty() {
        return Err(ApiError::BadRequest("file is empty".to_string()));
    }

    tracing::info!(assistant_id = %assistant_id, filename = %filename, size = bytes.len(), "uploading file");

    let file_id =
        add_file_to_vector_store(state.assistants.as_ref(), &assistant_id, &filename, bytes)
            .await?;

    Ok((StatusCode::CREATED, Json(UploadFileResponse { file_id })))
}
