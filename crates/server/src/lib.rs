//! Web front end: one form, one scrape per submission.

pub mod config;
pub mod error;
pub mod routes;
pub mod templates;

use std::sync::{Arc, Mutex, PoisonError};

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;
use vitrina_core::{ExtractorConfig, ProductSelectors, ProfileLoader, ProfileLoaderBuilder};

pub use config::ServerConfig;
pub use error::AppError;

/// Shared request state.
#[derive(Clone)]
pub struct AppState {
    /// Settings used when no site profile matches the product URL.
    pub extractor: Arc<ExtractorConfig>,
    profiles: Arc<Mutex<ProfileLoader>>,
}

impl AppState {
    /// Extraction for form submissions is eager and verbose. Profiles come
    /// from `profile_dir` when set, otherwise from the default directories.
    pub fn new(config: &ServerConfig) -> Self {
        let profiles = match &config.profile_dir {
            Some(dir) => ProfileLoaderBuilder::new().custom_dir(dir).build(),
            None => ProfileLoader::default(),
        };

        Self::with_profiles(config, profiles)
    }

    pub fn with_profiles(config: &ServerConfig, profiles: ProfileLoader) -> Self {
        let extractor = ExtractorConfig::builder()
            .eager(true)
            .verbose(true)
            .fetch(config.fetch.clone())
            .build();

        Self { extractor: Arc::new(extractor), profiles: Arc::new(Mutex::new(profiles)) }
    }

    /// Extractor settings for one product URL, with its site profile applied.
    pub fn extractor_for(&self, url: &str) -> vitrina_core::Result<ExtractorConfig> {
        let profile = self.profiles.lock().unwrap_or_else(PoisonError::into_inner).load_for_url(url)?;

        let mut config = ExtractorConfig::clone(&self.extractor);
        if !profile.is_empty() {
            tracing::debug!(url, "Applying site profile");
            config.selectors = Arc::new(ProductSelectors::compile(&profile)?);
            config.fetch.headers.extend(profile.header_pairs());
        }

        Ok(config)
    }
}

/// Builds the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::welcome))
        .route("/scrape", post(routes::scrape))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
