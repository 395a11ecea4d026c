use askama::Template;
use axum::Form;
use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::response::Html;
use serde::Deserialize;

use crate::AppState;
use crate::error::AppError;
use crate::templates::{IndexTemplate, ProductTemplate};

/// Body of the scrape form.
#[derive(Debug, Deserialize)]
pub struct ScrapeForm {
    pub url: Option<String>,
}

impl ScrapeForm {
    /// The submitted URL, `None` when the field is absent or blank.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|url| !url.is_empty())
    }
}

/// GET / - welcome page with the URL form
pub async fn welcome() -> Result<Html<String>, AppError> {
    Ok(Html(IndexTemplate.render()?))
}

/// POST /scrape - fetch one product page and render its fields
///
/// # Errors
/// - 400 Bad Request: `url` missing, blank, or not an http(s) URL
/// - 502 Bad Gateway: the page answered with a non-200 status or the request failed
/// - 500 Internal Server Error: the site profile for the URL does not compile
/// - 504 Gateway Timeout: the page did not answer in time
pub async fn scrape(
    State(state): State<AppState>,
    form: Result<Form<ScrapeForm>, FormRejection>,
) -> Result<Html<String>, AppError> {
    let Form(form) = form?;
    let url = form.url().ok_or(AppError::MissingUrl)?;

    let extractor = state.extractor_for(url)?;
    let product = vitrina_core::scrape(url, &extractor).await?;

    tracing::info!(
        url,
        name = %product.name,
        images = product.images.len(),
        "Scraped product"
    );

    Ok(Html(ProductTemplate::new(url, &product).render()?))
}

/// GET /health - liveness check
pub async fn health() -> &'static str {
    "ok"
}
