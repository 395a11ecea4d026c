use tracing_subscriber::EnvFilter;
use vitrina_server::config::DEFAULT_LOG_FILTER;
use vitrina_server::{AppState, ServerConfig, app};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .init();

    let config = ServerConfig::from_env()?;
    if let Some(dir) = &config.profile_dir {
        tracing::info!("Loading site profiles from {}", dir.display());
    }
    let router = app(AppState::new(&config));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Vitrina listening on http://{}", config.bind_addr);

    axum::serve(listener, router).await?;

    Ok(())
}
