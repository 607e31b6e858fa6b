//! Admin listing

use crate::handlers::error::ApiError;
use crate::render;
use crate::AppState;
use axum::{extract::State, response::Html};

/// GET /admin
pub async fn list(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let entries = state.submissions.list_for_admin().await?;
    Ok(Html(render::admin_page(&entries)))
}
