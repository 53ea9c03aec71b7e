// src/application/state.rs

use std::sync::Arc;

use crate::infrastructure::SharedDataFile;
use crate::integrations::anilist::CatalogGateway;
use crate::services::{DiscoveryService, TrackingService};

/// Application state shared by every handler.
/// All fields are Arc-wrapped so axum can clone it per request.
/// Services are initialized in server.rs and passed here.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogGateway>,
    pub discovery_service: Arc<DiscoveryService>,
    pub tracking_service: Arc<TrackingService>,
    pub shared_data: Arc<SharedDataFile>,
}
