//! JSON API

use crate::handlers::error::ApiError;
use crate::AppState;
use axum::{extract::State, Json};
use contact_types::ContactEntry;

/// GET /api/submissions
pub async fn submissions(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactEntry>>, ApiError> {
    let entries = state.submissions.list_as_json().await?;
    Ok(Json(entries))
}
