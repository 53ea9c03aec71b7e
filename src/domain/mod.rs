// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod decade;
pub mod manga;
pub mod tracking;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Catalog data
pub use decade::Decade;
pub use manga::{CoverImage, MangaSummary, MangaTitle, TitleKey, YearBatch};

// Tracking
pub use tracking::{
    validate_tracking_state, ItemView, Rating, TrackedItem, TrackedKeys, TrackingAction,
    TrackingCommand, TrackingList, TrackingState, TrackingView, CANDIDATE_ACTIONS,
};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Rating {0} is outside 1-10")]
    InvalidRating(i64),

    #[error("Cover URL cannot be empty")]
    EmptyCoverUrl,

    #[error("{0} is not tracked in the required list")]
    NotTracked(String),

    #[error("Unknown decade '{0}', expected one of 2020s, 2010s, 2000s, 1990s, 1980s, 1970s, 1960s")]
    InvalidDecade(String),

    #[error("Year {0} is not a 4-digit year")]
    InvalidYear(i32),

    #[error("Page numbers start at 1, got {0}")]
    InvalidPage(u32),

    #[error("Missing payload field: {0}")]
    MissingPayload(&'static str),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
