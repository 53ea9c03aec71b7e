// src/application/router.rs
//
// Route table for the whole HTTP surface

use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    response::Html,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::application::commands::*;
use crate::application::state::AppState;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(index))
        .route("/graphql", post(graphql_proxy))
        .route("/api/manga/:decade", get(manga_by_decade))
        .route("/api/saveData", post(save_data))
        .route("/api/loadData", get(load_data))
        .route("/api/discover/:decade", get(discover))
        .route("/api/tracking", get(get_tracking))
        .route("/api/tracking/caught-up", get(get_caught_up))
        .route("/api/tracking/completed", get(get_completed))
        .route("/api/tracking/commands", post(apply_command))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
