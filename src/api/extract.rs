//! Extractors whose rejections render as [`ApiError`].

use super::ApiError;
use axum::extract::{FromRequest, FromRequestParts};
use uuid::Uuid;

/// JSON body extractor.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Parses a path identifier.
///
/// A malformed identifier cannot match any record, so it is reported as
/// missing.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] naming `entity` when `raw` is not a UUID.
pub fn parse_id(entity: &str, raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(format!("{entity} with id {raw} not found")))
}
