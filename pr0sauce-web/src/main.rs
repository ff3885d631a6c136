//! pr0sauce-web - Item detail view for recognized songs
//!
//! Serves one page per pr0gramm item id, backed by a GraphQL service and
//! the Spotify oEmbed endpoint for cover art.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pr0sauce_common::config::{load_toml_config, AppConfig, ConfigOverrides};
use pr0sauce_web::{build_router, AppState};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for pr0sauce-web
#[derive(Parser, Debug)]
#[command(name = "pr0sauce-web")]
#[command(about = "Item detail view for songs recognized in pr0gramm posts")]
#[command(version)]
struct Args {
    /// TOML config file (default: <config dir>/pr0sauce/config.toml if present)
    #[arg(short, long, env = "PR0SAUCE_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(short, long, env = "PR0SAUCE_BIND")]
    bind: Option<String>,

    /// GraphQL endpoint serving the item query
    #[arg(long, env = "PR0SAUCE_GRAPHQL_ENDPOINT")]
    graphql_endpoint: Option<String>,

    /// oEmbed endpoint used for cover art
    #[arg(long, env = "PR0SAUCE_OEMBED_ENDPOINT")]
    oembed_endpoint: Option<String>,

    /// Timeout for outbound HTTP requests, in seconds
    #[arg(long, env = "PR0SAUCE_REQUEST_TIMEOUT_SECS")]
    request_timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing is up so the file can set the log level
    let loaded = load_toml_config(args.config.as_deref()).context("Failed to load config file")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| loaded.toml.logging.level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting pr0sauce-web v{}", env!("CARGO_PKG_VERSION"));
    match &loaded.source {
        Some(path) => info!("Loaded config file: {}", path.display()),
        None => info!("No config file found, using defaults"),
    }

    let overrides = ConfigOverrides {
        bind: args.bind,
        graphql_endpoint: args.graphql_endpoint,
        oembed_endpoint: args.oembed_endpoint,
        request_timeout_secs: args.request_timeout_secs,
    };
    let config = AppConfig::resolve(&overrides, &loaded.toml).context("Invalid configuration")?;

    info!("GraphQL endpoint: {}", config.graphql_endpoint);
    info!("oEmbed endpoint: {}", config.oembed_endpoint);
    info!("Request timeout: {:?}", config.request_timeout);

    let state = AppState::from_config(&config).context("Failed to build HTTP client")?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .context("Failed to bind to address")?;

    info!("pr0sauce-web listening on http://{}", config.bind);
    info!("Health check: http://{}/health", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
