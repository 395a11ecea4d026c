//! Mapping of scrape failures onto HTTP responses.

use askama::Template;
use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use vitrina_core::VitrinaError;

use crate::templates::ErrorTemplate;

/// Errors a request handler can end with.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The form was submitted without a usable `url` field.
    #[error("The form field 'url' is required.")]
    MissingUrl,

    /// The request body could not be read as a form.
    #[error("Invalid form submission: {0}")]
    Form(#[from] FormRejection),

    #[error(transparent)]
    Scrape(#[from] VitrinaError),

    #[error("Failed to render page: {0}")]
    Render(#[from] askama::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingUrl => StatusCode::BAD_REQUEST,
            AppError::Form(rejection) => rejection.status(),
            AppError::Scrape(err) => match err {
                VitrinaError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
                VitrinaError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                VitrinaError::FetchFailed { .. } | VitrinaError::HttpError(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn title(&self) -> &'static str {
        match self {
            AppError::MissingUrl => "Missing product URL",
            AppError::Form(_) => "Invalid form submission",
            AppError::Scrape(VitrinaError::InvalidUrl(_)) => "Invalid product URL",
            AppError::Scrape(VitrinaError::InvalidSelector { .. } | VitrinaError::InvalidHeader { .. }) => {
                "Invalid site profile"
            }
            AppError::Scrape(_) => "Could not fetch the product page",
            AppError::Render(_) => "Something went wrong",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(%status, error = %self, "Request failed");
        } else {
            tracing::warn!(%status, error = %self, "Request rejected");
        }

        let message = self.to_string();
        let page = ErrorTemplate { status: status.as_u16(), title: self.title(), message: &message };

        match page.render() {
            Ok(body) => (status, Html(body)).into_response(),
            Err(_) => (status, message).into_response(),
        }
    }
}
