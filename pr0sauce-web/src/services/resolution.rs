//! Item resolution flow
//!
//! Combines the record lookup with the optional cover art lookup and maps
//! the outcome to exactly one [`Resolution`] state:
//!
//! ```text
//! Loading ──fetch error──────────────► Error
//!    │────empty result───────────────► NotFound
//!    └────record[0] (+ artwork?)─────► Success
//! ```
//!
//! Artwork is only looked up after a record with a Spotify id came back, and
//! an artwork failure never leaves `Success`.

use std::sync::Arc;

use pr0sauce_common::ItemRecord;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::{ArtworkResolver, RecordFetcher};

/// Message shown to users when the record lookup fails
///
/// The underlying error is only written to the log.
pub const QUERY_FAILED_MESSAGE: &str = "The item could not be loaded. Please try again later.";

/// Resolution state for one item id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Resolution {
    #[default]
    Loading,
    Error {
        message: String,
    },
    NotFound,
    Success {
        record: ItemRecord,
        artwork_url: Option<String>,
    },
}

impl Resolution {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Resolution::Loading)
    }
}

/// Runs the resolution flow against a record source and an artwork source
pub struct ItemResolver {
    records: Arc<dyn RecordFetcher>,
    artwork: Arc<dyn ArtworkResolver>,
}

impl ItemResolver {
    pub fn new(records: Arc<dyn RecordFetcher>, artwork: Arc<dyn ArtworkResolver>) -> Self {
        Self { records, artwork }
    }

    /// Resolve one item id to a terminal state
    ///
    /// Every call starts over from [`Resolution::Loading`]; nothing is kept
    /// between calls.
    pub async fn resolve(&self, item_id: i64) -> Resolution {
        let records = match self.records.fetch(item_id).await {
            Ok(records) => records,
            Err(e) => {
                warn!(item_id, error = %e, "Item lookup failed");
                return Resolution::Error {
                    message: QUERY_FAILED_MESSAGE.to_string(),
                };
            }
        };

        if records.len() > 1 {
            debug!(item_id, rows = records.len(), "Duplicate item rows, using the first");
        }

        let Some(record) = records.into_iter().next() else {
            info!(item_id, "No item found");
            return Resolution::NotFound;
        };

        let artwork_url = match record.spotify_id.as_deref() {
            Some(spotify_id) => match self.artwork.resolve(spotify_id).await {
                Ok(url) => Some(url),
                Err(e) => {
                    debug!(item_id, spotify_id = %spotify_id, error = %e, "Cover art lookup failed");
                    None
                }
            },
            None => None,
        };

        Resolution::Success {
            record,
            artwork_url,
        }
    }
}
