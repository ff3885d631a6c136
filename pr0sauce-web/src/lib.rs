//! pr0sauce-web library
//!
//! Item detail view for songs recognized in pr0gramm posts: one GraphQL
//! lookup per request, plus an optional Spotify cover art lookup.

use std::sync::Arc;

use axum::Router;
use pr0sauce_common::config::AppConfig;
use serde::Serialize;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod services;
pub mod view;

pub use crate::error::{ApiError, ApiResult};

use services::{GraphQlRecordFetcher, ItemResolver, SpotifyOEmbedResolver};

/// Upstream services this instance talks to, as reported by `/health`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Upstreams {
    pub graphql_endpoint: String,
    pub oembed_endpoint: String,
}

impl Upstreams {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            graphql_endpoint: config.graphql_endpoint.to_string(),
            oembed_endpoint: config.oembed_endpoint.to_string(),
        }
    }
}

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Resolution flow; stateless, shared by all requests
    pub resolver: Arc<ItemResolver>,
    pub upstreams: Arc<Upstreams>,
}

impl AppState {
    /// Create new application state
    pub fn new(resolver: ItemResolver, upstreams: Upstreams) -> Self {
        Self {
            resolver: Arc::new(resolver),
            upstreams: Arc::new(upstreams),
        }
    }

    /// Wire the GraphQL and oEmbed clients from configuration
    pub fn from_config(config: &AppConfig) -> reqwest::Result<Self> {
        let http_client = services::build_http_client(config.request_timeout)?;

        let records = GraphQlRecordFetcher::new(http_client.clone(), config.graphql_endpoint.clone());
        let artwork = SpotifyOEmbedResolver::new(http_client, config.oembed_endpoint.clone());

        Ok(Self::new(
            ItemResolver::new(Arc::new(records), Arc::new(artwork)),
            Upstreams::from_config(config),
        ))
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/", get(api::serve_index))
        .route("/lookup", get(api::lookup_redirect))
        .route("/api/item/:id", get(api::get_item))
        .route("/:id", get(api::serve_item_page))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
