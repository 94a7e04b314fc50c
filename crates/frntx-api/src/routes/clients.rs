use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use frntx_persist::ClientRecord;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct ListClientsResponse {
    pub clients: Vec<ClientRecord>,
}

pub async fn list_clients(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ListClientsResponse>> {
    let clients = state.mirror.list_clients().await?;
    Ok(Json(ListClientsResponse { clients }))
}

pub async fn get_client(
    State(state): State<Arc<AppState>>,
    Path(client_id): Path<String>,
) -> ApiResult<Json<ClientRecord>> {
    let client = state
        .mirror
        .get_client(&client_id)
        .await?
        .ok_or(ApiError::ClientNotFound(client_id))?;

    Ok(Json(client))
}
