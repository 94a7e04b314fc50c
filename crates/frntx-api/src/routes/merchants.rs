use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use frntx_persist::{
    reconcile_merchant_files, MerchantFileRecord, MerchantPatch, MerchantRecord, NewMerchant,
};
use frntx_storage::unique_object_name;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CreateMerchantRequest {
    pub company_name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListMerchantsResponse {
    pub merchants: Vec<MerchantRecord>,
}

pub async fn list_merchants(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ListMerchantsResponse>> {
    let merchants = state.mirror.list_merchants().await?;
    Ok(Json(ListMerchantsResponse { merchants }))
}

pub async fn create_merchant(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateMerchantRequest>,
) -> ApiResult<(StatusCode, Json<MerchantRecord>)> {
    if req.company_name.trim().is_empty() {
        return Err(ApiError::BadRequest("company_name is required".to_string()));
    }

    let merchant = state
        .mirror
        .create_merchant(NewMerchant {
            company_name: req.company_name,
            logo_path: req.logo_path,
            description: req.description,
        })
        .await?;

    tracing::info!(merchant_id = %merchant.id, "merchant created");
    Ok((StatusCode::CREATED, Json(merchant)))
}

pub async fn get_merchant(
    State(state): State<Arc<AppState>>,
    Path(merchant_id): Path<String>,
) -> ApiResult<Json<MerchantRecord>> {
    let merchant = state
        .mirror
        .get_merchant(&merchant_id)
        .await?
        .ok_or(ApiError::MerchantNotFound(merchant_id))?;

    Ok(Json(merchant))
}

pub async fn update_merchant(
    State(state): State<Arc<AppState>>,
    Path(merchant_id): Path<String>,
    Json(patch): Json<MerchantPatch>,
) -> ApiResult<Json<MerchantRecord>> {
    state.mirror.update_merchant(&merchant_id, patch).await?;

    let merchant = state
        .mirror
        .get_merchant(&merchant_id)
        .await?
        .ok_or(ApiError::MerchantNotFound(merchant_id))?;

    Ok(Json(merchant))
}

pub async fn delete_merchant(
    State(state): State<Arc<AppState>>,
    Path(merchant_id): Path<String>,
) -> ApiResult<StatusCode> {
    if state.mirror.get_merchant(&merchant_id).await?.is_none() {
        return Err(ApiError::MerchantNotFound(merchant_id));
    }

    state.mirror.delete_merchant(&merchant_id).await?;
    tracing::info!(merchant_id = %merchant_id, "merchant deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Serialize)]
pub struct MerchantFilesResponse {
    pub files: Vec<MerchantFileRecord>,
}

pub async fn list_merchant_files(
    State(state): State<Arc<AppState>>,
    Path(merchant_id): Path<String>,
) -> ApiResult<Json<MerchantFilesResponse>> {
    if state.mirror.get_merchant(&merchant_id).await?.is_none() {
        return Err(ApiError::MerchantNotFound(merchant_id));
    }

    let files = state.mirror.list_merchant_files(&merchant_id).await?;
    Ok(Json(MerchantFilesResponse { files }))
}

#[derive(Debug, Deserialize)]
pub struct ReplaceFilesRequest {
    pub files: Vec<MerchantFileRecord>,
}

/// Replace the merchant's file set with the provided one. Rows missing from
/// the request are deleted, new rows are inserted, unchanged rows are left
/// alone.
pub async fn replace_merchant_files(
    State(state): State<Arc<AppState>>,
    Path(merchant_id): Path<String>,
    Json(req): Json<ReplaceFilesRequest>,
) -> ApiResult<Json<MerchantFilesResponse>> {
    if state.mirror.get_merchant(&merchant_id).await?.is_none() {
        return Err(ApiError::MerchantNotFound(merchant_id));
    }

    if req.files.iter().any(|f| f.merchant_id != merchant_id) {
        return Err(ApiError::BadRequest(
            "file rows must belong to the addressed merchant".to_string(),
        ));
    }

    reconcile_merchant_files(state.mirror.as_ref(), &merchant_id, req.files).await?;

    let files = state.mirror.list_merchant_files(&merchant_id).await?;
    Ok(Json(MerchantFilesResponse { files }))
}

/// Multipart upload of a merchant document: the bytes land in the object
/// store under a collision-free name, the mirror gets a row pointing at the
/// public URL.
pub async fn upload_merchant_file(
    State(state): State<Arc<AppState>>,
    Path(merchant_id): Path<String>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<MerchantFileRecord>)> {
    if state.mirror.get_merchant(&merchant_id).await?.is_none() {
        return Err(ApiError::MerchantNotFound(merchant_id));
    }

    let mut file: Option<(String, String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            let filename = field
                .file_name()
                .map(str::to_string)
                .ok_or_else(|| ApiError::BadRequest("file field needs a filename".to_string()))?;
            let mime_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;
            file = Some((filename, mime_type, bytes.to_vec()));
        }
    }

    let (filename, mime_type, bytes) =
        file.ok_or_else(|| ApiError::BadRequest("file is required".to_string()))?;
    if bytes.is_empty() {
        return Err(ApiError::BadRequest("file is empty".to_string()));
    }

    let bucket = &state.config.storage.bucket;
    let object_path = format!("merchants/{}/{}", merchant_id, unique_object_name(&filename));

    state
        .objects
        .upload(bucket, &object_path, bytes.clone().into(), &mime_type)
        .await?;

    let url = state.objects.public_url(bucket, &object_path);
    let record = state
        .mirror
        .add_merchant_file(MerchantFileRecord::new(
            &merchant_id,
            &filename,
            url,
            bytes.len() as u64,
            &mime_type,
        ))
        .await?;

    tracing::info!(merchant_id = %merchant_id, file_id = %record.id, "merchant file uploaded");
    Ok((StatusCode::CREATED, Json(record)))
}

/// Delete one merchant file: the mirror row goes first, then the stored
/// object when its path can be recovered from the public URL.
pub async fn delete_merchant_file(
    State(state): State<Arc<AppState>>,
    Path((merchant_id, file_id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    let files = state.mirror.list_merchant_files(&merchant_id).await?;
    let file = files
        .into_iter()
        .find(|f| f.id == file_id)
        .ok_or(ApiError::FileNotFound(file_id))?;

    state.mirror.delete_merchant_file(&file.id).await?;

    let bucket = &state.config.storage.bucket;
    let public_prefix = state.objects.public_url(bucket, "");
    if let Some(object_path) = file.url.strip_prefix(&public_prefix) {
        state
            .objects
            .remove(bucket, &[object_path.to_string()])
            .await?;
    } else {
        tracing::warn!(url = %file.url, "file url does not match the configured store, object kept");
    }

    tracing::info!(merchant_id = %merchant_id, file_id = %file.id, "merchant file deleted");
    Ok(StatusCode::NO_CONTENT)
}
