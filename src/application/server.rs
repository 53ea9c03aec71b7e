// src/application/server.rs
//
// Server bootstrap
//
// Wiring order:
// 1. Infrastructure (pool, schema, catalog client, shared file)
// 2. Repositories
// 3. Services
// 4. Application state + router

use std::sync::Arc;

use log::info;
use tokio::net::TcpListener;

use crate::application::{router::build_router, state::AppState};
use crate::config::Config;
use crate::db::{
    create_connection_pool, get_connection, initialize_database, verify_database_integrity,
};
use crate::error::AppResult;
use crate::infrastructure::SharedDataFile;
use crate::integrations::anilist::{AniListClient, CatalogGateway};
use crate::repositories::{BlobStore, SqliteBlobStore, TrackingStore};
use crate::services::{DiscoveryService, TrackingService};

/// Build every component from `config`
pub fn build_state(config: &Config) -> AppResult<AppState> {
    // 1. INFRASTRUCTURE
    let pool = Arc::new(create_connection_pool(&config.db_path)?);
    {
        let conn = get_connection(&pool)?;
        initialize_database(&conn)?;
        verify_database_integrity(&conn)?;
    }
    info!("Database ready at {}", config.db_path.display());

    let catalog: Arc<dyn CatalogGateway> =
        Arc::new(AniListClient::new(&config.catalog_url, config.http_timeout)?);
    let shared_data = Arc::new(SharedDataFile::new(config.data_file.clone()));

    // 2. REPOSITORIES
    let blobs: Arc<dyn BlobStore> = Arc::new(SqliteBlobStore::new(pool));
    let tracking_store = TrackingStore::new(blobs);

    // 3. SERVICES
    let discovery_service = Arc::new(DiscoveryService::new(catalog.clone()));
    let tracking_service = Arc::new(TrackingService::open(
        tracking_store,
        discovery_service.clone(),
    ));

    Ok(AppState {
        catalog,
        discovery_service,
        tracking_service,
        shared_data,
    })
}

pub async fn start_server(config: Config) -> AppResult<()> {
    info!("Initializing state...");
    let state = build_state(&config)?;
    let app = build_router(state);

    let address = format!("0.0.0.0:{}", config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on http://localhost:{}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                log::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                log::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
