// src/application/error_handling.rs
//
// Error Handling for HTTP handlers
//
// ARCHITECTURE:
// - Maps internal errors → user-friendly responses
// - Provides consistent error format for UI
// - Never exposes internal implementation details
// - Logs errors for debugging

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::error::AppError;

/// Standard error response for UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Resource not found (404)
    NotFound,

    /// Invalid input/validation error (400)
    Validation,

    /// Domain invariant violation (422)
    DomainError,

    /// Request overtaken by a newer one (409)
    Conflict,

    /// Database/persistence error (500)
    Database,

    /// External service error (502)
    ExternalService,

    /// File system error (500)
    FileSystem,

    /// Other/unknown error (500)
    Internal,
}

impl ErrorType {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorType::NotFound => StatusCode::NOT_FOUND,
            ErrorType::Validation => StatusCode::BAD_REQUEST,
            ErrorType::DomainError => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorType::Conflict => StatusCode::CONFLICT,
            ErrorType::ExternalService => StatusCode::BAD_GATEWAY,
            ErrorType::Database | ErrorType::FileSystem | ErrorType::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl ErrorResponse {
    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound => Self::not_found("Manga"),

            AppError::InvalidRequest(message) => Self::validation(message),

            AppError::Domain(domain_error) => match domain_error {
                DomainError::InvariantViolation(_) | DomainError::NotTracked(_) => Self {
                    success: false,
                    error_type: ErrorType::DomainError,
                    message: "Action not allowed for this manga".to_string(),
                    details: Some(domain_error.to_string()),
                },
                other => Self::validation(other.to_string()),
            },

            AppError::Superseded { .. } => Self {
                success: false,
                error_type: ErrorType::Conflict,
                message: "A newer request replaced this one".to_string(),
                details: Some(error.to_string()),
            },

            AppError::Network(_) | AppError::UpstreamQuery(_) | AppError::MalformedResponse(_) => {
                error!("Catalog error: {}", error);

                Self {
                    success: false,
                    error_type: ErrorType::ExternalService,
                    message: "External service error".to_string(),
                    details: Some(error.to_string()),
                }
            }

            AppError::Database(_) | AppError::Pool(_) => {
                error!("Database error: {}", error);

                Self {
                    success: false,
                    error_type: ErrorType::Database,
                    message: "Database operation failed".to_string(),
                    details: Some("Check logs for details".to_string()),
                }
            }

            AppError::Io(io_error) => {
                error!("IO error: {:?}", io_error);

                Self {
                    success: false,
                    error_type: ErrorType::FileSystem,
                    message: "File system operation failed".to_string(),
                    details: Some(io_error.to_string()),
                }
            }

            AppError::Serialization(serde_error) => {
                error!("Serialization error: {:?}", serde_error);

                Self {
                    success: false,
                    error_type: ErrorType::Internal,
                    message: "Data serialization failed".to_string(),
                    details: None,
                }
            }

            AppError::Config(message) | AppError::Other(message) => {
                error!("Other error: {}", message);

                Self {
                    success: false,
                    error_type: ErrorType::Internal,
                    message,
                    details: None,
                }
            }
        }
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self {
            success: false,
            error_type: ErrorType::Validation,
            message,
            details: None,
        }
    }

    /// Create not found error
    pub fn not_found(resource: &str) -> Self {
        Self {
            success: false,
            error_type: ErrorType::NotFound,
            message: format!("{} not found", resource),
            details: None,
        }
    }
}

/// `Json` extractor whose rejection is an `ErrorResponse`
///
/// axum's own rejection is a plain-text body the page cannot show.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::InvalidRequest(rejection.body_text())),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse::from_app_error(self);
        (body.error_type.status(), Json(body)).into_response()
    }
}
