//! Handler error type with IntoResponse
//!
//! Storage failures are logged and surface as a generic 500; callers only
//! ever see a flat error message.

use crate::storage::StorageError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    /// Body could not be decoded (400/415/422, as the extractor reported)
    InvalidBody { status: StatusCode, message: String },

    /// Store unavailable or insert rejected (500, logged)
    Storage(StorageError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::InvalidBody { status, message } => (
                *status,
                json!({
                    "error": "bad_request",
                    "message": message
                }),
            ),
            Self::Storage(e) => {
                tracing::error!("Storage error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}
