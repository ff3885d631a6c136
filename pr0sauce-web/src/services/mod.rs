//! Outbound lookups and the resolution flow built on top of them

pub mod artwork_resolver;
pub mod record_fetcher;
pub mod resolution;

pub use artwork_resolver::{ArtworkResolver, LookupError, SpotifyOEmbedResolver};
pub use record_fetcher::{GraphQlRecordFetcher, QueryError, RecordFetcher};
pub use resolution::{ItemResolver, Resolution, QUERY_FAILED_MESSAGE};

use std::time::Duration;

const USER_AGENT: &str = concat!("pr0sauce/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by both lookups
pub fn build_http_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}
