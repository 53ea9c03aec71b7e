// src/lib.rs
// AniLog - Local-first manga tracker
//
// Architecture:
// - Domain-centric: tracking rules live in the domain (TrackingState)
// - Explicit: the page sends commands, it never edits state itself
// - Local-first: state is persisted in a local SQLite blob store
// - Application Layer: HTTP boundary (axum)

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    validate_tracking_state,
    CoverImage,
    // Catalog data
    Decade,
    DomainError,
    // Tracking
    ItemView,
    MangaSummary,
    MangaTitle,
    Rating,
    TitleKey,
    TrackedItem,
    TrackingAction,
    TrackingCommand,
    TrackingList,
    TrackingState,
    TrackingView,
    YearBatch,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{BlobStore, InMemoryBlobStore, SqliteBlobStore, TrackingStore};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{CommandOutcome, Discovery, DiscoveryService, TrackingService};

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::anilist::{AniListClient, CatalogGateway, GraphQlRequest};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{build_router, start_server, AppState};
pub use config::Config;
