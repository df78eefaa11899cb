//! Custom Axum Extractors
//!
//! JSON body and query extractors that run `validator` rules and reject with
//! the standard error body instead of axum's plain-text rejections.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::{format_validation_errors, ApiError};

// =============================================================================
// Validated Query Extractor
// =============================================================================

/// Query extractor with validation
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + validator::Validate,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| error_response(ApiError::InvalidParameter(e.body_text())))?;

        value.validate().map_err(|e| {
            error_response(ApiError::ValidationError(format_validation_errors(&e)))
        })?;

        Ok(ValidatedQuery(value))
    }
}

// =============================================================================
// Validated JSON Extractor
// =============================================================================

/// JSON extractor with validation
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + validator::Validate,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| error_response(ApiError::BadRequest(e.body_text())))?;

        value.validate().map_err(|e| {
            error_response(ApiError::ValidationError(format_validation_errors(&e)))
        })?;

        Ok(ValidatedJson(value))
    }
}

/// Render an [`ApiError`] as a response
pub fn error_response(error: ApiError) -> Response {
    error.into_response()
}
