pub mod members;
pub mod workout_sessions;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path,
    },
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::validation::ValidationErrors;

/// Confirmation body for updates and deletes.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Json<Self> {
        Json(Self { message })
    }
}

/// Unwrap a JSON body, turning unreadable input into a schema-level validation error.
///
/// The rejection is taken as a value rather than returned by the extractor so
/// that handlers can look up the target row (and 404) before complaining about the body.
pub(crate) fn json_body(body: std::result::Result<Json<Value>, JsonRejection>) -> Result<Value> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!("Rejected request body: {}", rejection.body_text());
            Err(AppError::Validation(ValidationErrors::invalid_payload()))
        }
    }
}

/// Unwrap an integer id from the path. Ids that are not integers name no row,
/// so they get the caller's not-found error.
pub(crate) fn path_id(
    path: std::result::Result<Path<i64>, PathRejection>,
    not_found: fn() -> AppError,
) -> Result<i64> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(rejection) => {
            tracing::debug!("Rejected path id: {}", rejection.body_text());
            Err(not_found())
        }
    }
}
