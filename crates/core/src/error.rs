//! Error types for Vitrina operations.
//!
//! This module defines the main error type [`VitrinaError`] which represents
//! every failure that can stop a scrape: fetching the page, reading local
//! input, compiling selectors and loading site profiles.
//!
//! A field that cannot be located in a page is *not* an error. Extraction
//! recovers from it locally with a fixed fallback string (see
//! [`crate::extract`]).
//!
//! # Example
//!
//! ```rust
//! use vitrina_core::{Result, VitrinaError};
//!
//! fn require_host(url: &str) -> Result<&str> {
//!     if url.is_empty() {
//!         return Err(VitrinaError::InvalidUrl("empty URL".to_string()));
//!     }
//!     Ok(url)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fetching and extraction operations.
#[derive(Error, Debug)]
pub enum VitrinaError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other transport problems.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    ///
    /// Returned when a URL cannot be parsed or does not use http(s).
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The product page answered with something other than `200 OK`.
    #[error("Fetching {url} failed with HTTP status {status}")]
    FetchFailed { url: String, status: u16 },

    /// A configured request header is not a valid HTTP header.
    #[error("Invalid HTTP header {name}: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// A selector in a site profile could not be compiled.
    #[error("Invalid selector for {field}: {reason}")]
    InvalidSelector { field: String, reason: String },

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File and stdin I/O errors.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Output serialization errors.
    #[error("Failed to serialize product: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Site profile errors.
    ///
    /// Returned when parsing a site profile file fails.
    #[error("Site profile error: {0}")]
    SiteConfigError(String),
}

/// Result type alias for VitrinaError.
pub type Result<T> = std::result::Result<T, VitrinaError>;
