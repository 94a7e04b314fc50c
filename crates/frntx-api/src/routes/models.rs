use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use frntx_assistants::ModelInfo;

use crate::{error::ApiResult, state::AppState};

#[derive(Debug, Serialize)]
pub struct ListModelsResponse {
    pub models: Vec<ModelInfo>,
}

pub async fn list_models(State(state): State<Arc<AppState>>) -> ApiResult<Json<ListModelsResponse>> {
    let models = state.assistants.list_models().await?;
    Ok(Json(ListModelsResponse { models }))
}
