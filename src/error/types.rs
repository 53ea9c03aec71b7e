// src/error/types.rs
use crate::domain::DomainError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Resource not found")]
    NotFound,

    /// The request body could not be read as the expected JSON
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The catalog could not be reached at all
    #[error("Catalog unreachable: {0}")]
    Network(String),

    /// The catalog answered with a GraphQL `errors` array
    #[error("Catalog query failed: {0}")]
    UpstreamQuery(String),

    /// The catalog answered, but not with the expected `data.Page.media` shape
    #[error("Malformed catalog response: {0}")]
    MalformedResponse(String),

    /// A newer discovery request started while this one was in flight
    #[error("Discovery {epoch} was superseded by a newer request")]
    Superseded { epoch: u64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_message() {
        let json = serde_json::to_string(&AppError::Superseded { epoch: 3 }).unwrap();
        assert_eq!(json, "\"Discovery 3 was superseded by a newer request\"");
    }

    #[test]
    fn test_domain_error_converts() {
        let err: AppError = DomainError::EmptyCoverUrl.into();
        assert!(matches!(err, AppError::Domain(DomainError::EmptyCoverUrl)));
    }
}
