//! Product page retrieval from URLs, files, and stdin.
//!
//! [`fetch_page`] is the only network operation in the crate. It performs a
//! single GET with no retry and only accepts a `200 OK` answer; anything else
//! is reported as [`VitrinaError::FetchFailed`] so that extraction never runs
//! without a document.

use std::fs;
use std::path::PathBuf;
#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
#[cfg(feature = "fetch")]
use reqwest::{Client, StatusCode};
use url::Url;

use crate::{Result, VitrinaError};

/// HTTP client configuration for fetching product pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
    /// Extra request headers, usually taken from a site profile.
    /// A header named here replaces the default of the same name.
    pub headers: Vec<(String, String)>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: "Mozilla/5.0 (compatible; Vitrina/0.1)".to_string(),
            headers: Vec::new(),
        }
    }
}

/// Raw markup of a successfully fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Where the markup came from (URL, file path or `-`).
    pub url: String,
    pub html: String,
}

impl Page {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self { url: url.into(), html: html.into() }
    }
}

/// Validates a product URL before any request is made.
///
/// Only absolute `http` and `https` URLs are accepted.
pub fn parse_product_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url.trim()).map_err(|e| VitrinaError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(VitrinaError::InvalidUrl(format!(
            "unsupported scheme '{}', expected http:// or https://",
            other
        ))),
    }
}

/// Default `Accept-Language`, the locale the built-in selectors were written for.
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "es-MX,es;q=0.9,en;q=0.8";

/// Fetches a product page.
///
/// Issues one HTTP GET and returns the body when the status is exactly
/// `200 OK`. Redirects are followed by the client before the status check.
/// The timeout covers the whole exchange, body included.
#[cfg(feature = "fetch")]
pub async fn fetch_page(url: &str, config: &FetchConfig) -> Result<Page> {
    let parsed_url = parse_product_url(url)?;

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(VitrinaError::HttpError)?;

    let response = client
        .get(parsed_url.clone())
        .headers(request_headers(config)?)
        .send()
        .await
        .map_err(|e| map_request_error(e, config.timeout))?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(VitrinaError::FetchFailed { url: parsed_url.to_string(), status: status.as_u16() });
    }

    let html = response.text().await.map_err(|e| map_request_error(e, config.timeout))?;

    Ok(Page { url: parsed_url.to_string(), html })
}

/// Default headers overlaid with the configured ones.
#[cfg(feature = "fetch")]
fn request_headers(config: &FetchConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, header_value("User-Agent", &config.user_agent)?);
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(DEFAULT_ACCEPT_LANGUAGE));

    for (name, value) in &config.headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| VitrinaError::InvalidHeader { name: name.clone(), reason: e.to_string() })?;
        headers.insert(header_name, header_value(name, value)?);
    }

    Ok(headers)
}

#[cfg(feature = "fetch")]
fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| VitrinaError::InvalidHeader { name: name.to_string(), reason: e.to_string() })
}

#[cfg(feature = "fetch")]
fn map_request_error(error: reqwest::Error, timeout: u64) -> VitrinaError {
    if error.is_timeout() { VitrinaError::Timeout { timeout } } else { VitrinaError::HttpError(error) }
}

/// Reads a saved product page from a local file.
pub fn fetch_file(path: &str) -> Result<Page> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(VitrinaError::FileNotFound(path_buf))
    } else {
        let html = fs::read_to_string(&path_buf)?;
        Ok(Page::new(path, html))
    }
}

/// Reads a product page from standard input until EOF.
pub fn fetch_stdin() -> Result<Page> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    Ok(Page::new("-", buffer))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, 30);
        assert!(config.user_agent.contains("Vitrina"));
        assert!(config.headers.is_empty());
    }

    #[test]
    fn test_parse_product_url() {
        assert!(parse_product_url("https://www.mercadolibre.com.mx/p/MLM21816271").is_ok());
        assert!(parse_product_url("  http://example.com/item  ").is_ok());
        assert!(matches!(parse_product_url("example.com"), Err(VitrinaError::InvalidUrl(_))));
        assert!(matches!(
            parse_product_url("ftp://example.com/file"),
            Err(VitrinaError::InvalidUrl(_))
        ));
    }

    #[cfg(feature = "fetch")]
    #[test]
    fn test_fetch_page_invalid_url() {
        let config = FetchConfig::default();
        let result = std::thread::spawn(move || {
            tokio::runtime::Runtime::new()
                .unwrap()
                .block_on(fetch_page("not-a-url", &config))
        })
        .join()
        .unwrap();

        assert!(matches!(result, Err(VitrinaError::InvalidUrl(_))));
    }

    #[cfg(feature = "fetch")]
    #[test]
    fn test_request_headers_replace_defaults() {
        let config = FetchConfig {
            headers: vec![
                ("accept-language".to_string(), "es-AR,es;q=0.9".to_string()),
                ("Cookie".to_string(), "cp=1414".to_string()),
            ],
            ..Default::default()
        };

        let headers = request_headers(&config).unwrap();
        let languages: Vec<_> = headers.get_all(ACCEPT_LANGUAGE).iter().collect();
        assert_eq!(languages, vec!["es-AR,es;q=0.9"]);
        assert_eq!(headers["cookie"], "cp=1414");
        assert!(headers[USER_AGENT].to_str().unwrap().contains("Vitrina"));
    }

    #[cfg(feature = "fetch")]
    #[test]
    fn test_request_headers_rejects_invalid_name() {
        let config = FetchConfig { headers: vec![("Bad Header".to_string(), "x".to_string())], ..Default::default() };

        assert!(matches!(
            request_headers(&config),
            Err(VitrinaError::InvalidHeader { name, .. }) if name == "Bad Header"
        ));
    }

    #[test]
    fn test_fetch_file_not_found() {
        let result = fetch_file("/nonexistent/path/product.html");
        assert!(matches!(result, Err(VitrinaError::FileNotFound(_))));
    }

    #[test]
    fn test_fetch_file_reads_markup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("product.html");
        std::fs::write(&path, "<h1>Saved</h1>").unwrap();

        let page = fetch_file(path.to_str().unwrap()).unwrap();
        assert_eq!(page.html, "<h1>Saved</h1>");
        assert_eq!(page.url, path.to_str().unwrap());
    }
}
