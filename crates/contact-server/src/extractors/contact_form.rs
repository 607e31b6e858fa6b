//! Contact form extractor accepting URL-encoded or JSON bodies

use crate::handlers::error::ApiError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use contact_types::RawContactForm;

/// Raw contact fields from either body encoding
#[derive(Debug)]
pub struct ContactForm(pub RawContactForm);

/// `application/json` or `application/*+json`, parameters ignored, any case
fn is_json(req: &Request) -> bool {
    let Some(content_type) = req.headers().get(CONTENT_TYPE).and_then(|h| h.to_str().ok()) else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

#[async_trait]
impl<S> FromRequest<S> for ContactForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            let Json(raw) = Json::<RawContactForm>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::InvalidBody {
                    status: rejection.status(),
                    message: rejection.body_text(),
                })?;
            return Ok(Self(raw));
        }

        let Form(raw) = Form::<RawContactForm>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::InvalidBody {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;
        Ok(Self(raw))
    }
}
