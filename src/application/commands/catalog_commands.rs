// src/application/commands/catalog_commands.rs
//
// Catalog Command Handlers
//
// RULES:
// - Forward to the catalog gateway or the orchestrator
// - Never touch tracking state

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::application::{error_handling::ApiJson, state::AppState};
use crate::domain::{Decade, YearBatch};
use crate::error::AppResult;

/// Proxy a raw GraphQL payload to the catalog, keeping its status
pub async fn graphql_proxy(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<Value>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let response = state.catalog.forward(&body).await?;
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_GATEWAY);

    Ok((status, Json(response.body)))
}

/// Popular manga per year of a decade, nothing excluded
pub async fn manga_by_decade(
    State(state): State<AppState>,
    Path(decade): Path<String>,
) -> AppResult<Json<Vec<YearBatch>>> {
    let decade: Decade = decade.parse()?;

    let batches = state
        .discovery_service
        .fetch_decade_untracked(decade)
        .await?;

    Ok(Json(batches))
}
