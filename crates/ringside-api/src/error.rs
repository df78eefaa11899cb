//! API error handling
//!
//! Every failure is rendered as `{"status": "error", "code": <i32>, "message": ...}`
//! with the domain message passed through unchanged.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ringside_db::DbError;
use ringside_types::RingsideError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// API error with numeric error codes
#[derive(Debug, Error)]
pub enum ApiError {
    // =========================================================================
    // Request Errors (-1100 to -1199)
    // =========================================================================
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Ring Errors (-2000 to -2099)
    // =========================================================================
    #[error("{0}")]
    AlreadyInRing(String),

    #[error("{0}")]
    RingFull(String),

    #[error("{0}")]
    InsufficientBoxers(String),

    // =========================================================================
    // Boxer Errors (-3000 to -3099)
    // =========================================================================
    #[error("{0}")]
    DuplicateBoxer(String),

    #[error("{0}")]
    BoxerNotFound(String),

    #[error("{0}")]
    InvalidAttributes(String),

    // =========================================================================
    // Internal Errors (-5000 to -5099)
    // =========================================================================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Database error")]
    DatabaseError,
}

impl ApiError {
    /// Get the numeric error code
    pub fn error_code(&self) -> i32 {
        match self {
            // Request (-1100 to -1199)
            Self::BadRequest(_) => -1100,
            Self::InvalidParameter(_) => -1102,
            Self::ValidationError(_) => -1102,

            // Ring (-2000 to -2099)
            Self::AlreadyInRing(_) => -2001,
            Self::RingFull(_) => -2002,
            Self::InsufficientBoxers(_) => -2003,

            // Boxer (-3000 to -3099)
            Self::DuplicateBoxer(_) => -3001,
            Self::BoxerNotFound(_) => -3002,
            Self::InvalidAttributes(_) => -3003,

            // Internal (-5000 to -5099)
            Self::Internal(_) => -5000,
            Self::ServiceUnavailable(_) => -5001,
            Self::DatabaseError => -5002,
        }
    }

    /// Get the HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            Self::BadRequest(_)
            | Self::InvalidParameter(_)
            | Self::ValidationError(_)
            | Self::InvalidAttributes(_)
            | Self::InsufficientBoxers(_) => StatusCode::BAD_REQUEST,

            // 404 Not Found
            Self::BoxerNotFound(_) => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::DuplicateBoxer(_) | Self::AlreadyInRing(_) | Self::RingFull(_) => {
                StatusCode::CONFLICT
            }

            // 500 Internal Server Error
            Self::Internal(_) | Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // 503 Service Unavailable
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Always `"error"`
    pub status: String,
    /// Numeric error code
    pub code: i32,
    /// Human-readable error message
    pub message: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            status: "error".to_string(),
            code: err.error_code(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "Request rejected");
        }
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

// Implement From conversions
impl From<RingsideError> for ApiError {
    fn from(err: RingsideError) -> Self {
        let message = err.to_string();
        match err {
            RingsideError::DuplicateEntity { .. } => Self::DuplicateBoxer(message),
            RingsideError::InvalidAttributes { .. } => Self::InvalidAttributes(message),
            RingsideError::NotFound { .. } => Self::BoxerNotFound(message),
            RingsideError::AlreadyInRing { .. } => Self::AlreadyInRing(message),
            RingsideError::RingFull => Self::RingFull(message),
            RingsideError::InsufficientOccupants { .. } => Self::InsufficientBoxers(message),
            RingsideError::StorageUnavailable { .. } => {
                tracing::error!(error = %message, "Storage error");
                Self::DatabaseError
            }
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        RingsideError::from(err).into()
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(format_validation_errors(&err))
    }
}

/// Flatten field errors into `field: message, ...`
pub fn format_validation_errors(err: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = err
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                format!(
                    "{}: {}",
                    field,
                    e.message.as_ref().map(|m| m.as_ref()).unwrap_or("invalid")
                )
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ApiError::RingFull(String::new()).error_code(), -2002);
        assert_eq!(ApiError::DuplicateBoxer(String::new()).error_code(), -3001);
        assert_eq!(ApiError::DatabaseError.error_code(), -5002);
    }

    #[test]
    fn test_domain_errors_map_to_status_codes() {
        let cases = [
            (RingsideError::DuplicateEntity { name: "Ali".into() }, StatusCode::CONFLICT),
            (RingsideError::invalid_attribute("age", "0"), StatusCode::BAD_REQUEST),
            (RingsideError::boxer_not_found("Ali"), StatusCode::NOT_FOUND),
            (RingsideError::AlreadyInRing { name: "Ali".into() }, StatusCode::CONFLICT),
            (RingsideError::RingFull, StatusCode::CONFLICT),
            (RingsideError::InsufficientOccupants { present: 1 }, StatusCode::BAD_REQUEST),
            (RingsideError::storage("disk full"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_domain_message_is_kept() {
        let err = ApiError::from(RingsideError::RingFull);
        let body = ErrorResponse::from(&err);
        assert_eq!(body.status, "error");
        assert_eq!(body.message, "Ring is full, cannot add more boxers");

        let err = ApiError::from(DbError::Duplicate("Ali".into()));
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_storage_details_are_not_leaked() {
        let err = ApiError::from(RingsideError::storage("/var/lib/ringside.db locked"));
        assert_eq!(err.to_string(), "Database error");
    }
}
