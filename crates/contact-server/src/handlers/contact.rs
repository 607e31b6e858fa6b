//! Contact form handlers

use crate::extractors::ContactForm;
use crate::handlers::error::ApiError;
use crate::render;
use crate::AppState;
use axum::{extract::State, response::Html};

/// GET /
pub async fn form() -> Html<String> {
    Html(render::index_page())
}

/// POST /contact
pub async fn submit(
    State(state): State<AppState>,
    ContactForm(raw): ContactForm,
) -> Result<Html<String>, ApiError> {
    let entry = state.submissions.submit_contact(raw).await?;
    Ok(Html(render::confirmation_page(&entry)))
}
