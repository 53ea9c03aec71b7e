// src/application/commands/tracking_commands.rs
//
// Tracking Command Handlers
//
// RULES:
// - Validate the incoming command before the service sees it
// - Every response carries the state the page should render next

use axum::{
    extract::{Path, State},
    Json,
};

use crate::application::{
    dto::{CommandResponse, DiscoveryDto, TrackingCommandDto},
    error_handling::ApiJson,
    state::AppState,
};
use crate::domain::{Decade, ItemView, TrackingCommand, TrackingView};
use crate::error::{AppError, AppResult};

/// Fetch a decade and make it the current candidate set
pub async fn discover(
    State(state): State<AppState>,
    Path(decade): Path<String>,
) -> AppResult<Json<DiscoveryDto>> {
    let decade: Decade = decade.parse()?;

    let discovery = state.tracking_service.discover(decade).await?;
    let snapshot = state.tracking_service.snapshot()?;

    Ok(Json(DiscoveryDto::build(&discovery, &snapshot)?))
}

pub async fn get_tracking(State(state): State<AppState>) -> AppResult<Json<TrackingView>> {
    Ok(Json(state.tracking_service.view()?))
}

pub async fn get_caught_up(State(state): State<AppState>) -> AppResult<Json<Vec<ItemView>>> {
    Ok(Json(state.tracking_service.view()?.caught_up))
}

pub async fn get_completed(State(state): State<AppState>) -> AppResult<Json<Vec<ItemView>>> {
    Ok(Json(state.tracking_service.view()?.completed))
}

/// Apply one user action
pub async fn apply_command(
    State(state): State<AppState>,
    ApiJson(dto): ApiJson<TrackingCommandDto>,
) -> AppResult<Json<CommandResponse>> {
    let command = TrackingCommand::try_from(dto)?;

    // The save is synchronous SQLite I/O under the state lock
    let service = state.tracking_service.clone();
    let outcome = tokio::task::spawn_blocking(move || service.apply(command))
        .await
        .map_err(|e| AppError::Other(format!("Command task failed: {}", e)))??;
    let view = state.tracking_service.view()?;

    Ok(Json(CommandResponse {
        outcome,
        state: view,
    }))
}
