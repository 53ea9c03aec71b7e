// src/application/commands/data_commands.rs
//
// Shared data file handlers (/api/saveData, /api/loadData)

use axum::{extract::State, http::StatusCode, Json};
use serde_json::Value;

use crate::application::{error_handling::ApiJson, state::AppState};
use crate::error::AppResult;

pub async fn save_data(
    State(state): State<AppState>,
    ApiJson(data): ApiJson<Value>,
) -> AppResult<StatusCode> {
    state.shared_data.save(&data).await?;
    Ok(StatusCode::OK)
}

pub async fn load_data(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let data = state.shared_data.load().await?;
    Ok(Json(data))
}
