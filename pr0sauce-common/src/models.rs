//! Item record model
//!
//! One row of the `item` GraphQL field: a recognized song attached to a
//! pr0gramm post.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Base URL for linking an item back to its pr0gramm post
pub const PR0GRAMM_POST_BASE_URL: &str = "https://pr0gramm.com/new";

/// Recognized media match for a single pr0gramm item
///
/// Required fields never go missing structurally: a `null` from the backend
/// decodes to an empty string, and integer-typed columns decode to their
/// decimal representation. Link fields decode `null` and blank strings to
/// `None`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ItemRecord {
    /// Internal row identifier
    #[serde(default, deserialize_with = "scalar_string")]
    pub id: String,
    /// pr0gramm item identifier
    #[serde(default, deserialize_with = "scalar_string")]
    pub item_id: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub title: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub artist: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub album: String,
    /// Source URL reported by the recognition service
    #[serde(default, deserialize_with = "scalar_string")]
    pub url: String,
    /// ACRCloud recognition identifier
    #[serde(default, deserialize_with = "scalar_string")]
    pub acr_id: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub provider: String,
    #[serde(default, deserialize_with = "optional_link")]
    pub spotify_url: Option<String>,
    /// Spotify track id, used to look up cover art
    #[serde(default, deserialize_with = "optional_link")]
    pub spotify_id: Option<String>,
    #[serde(default, deserialize_with = "optional_link")]
    pub youtube_url: Option<String>,
    #[serde(default, deserialize_with = "optional_link")]
    pub youtube_id: Option<String>,
}

impl ItemRecord {
    /// Link to the pr0gramm post this record belongs to
    pub fn post_url(&self) -> String {
        format!("{}/{}", PR0GRAMM_POST_BASE_URL, self.item_id)
    }
}

/// Parse a path segment as a pr0gramm item id
///
/// The `GetItem` variable is a GraphQL `Int`, so only the 32-bit range is
/// accepted. Callers must reject the request (redirect) on error instead of
/// resolving.
pub fn parse_item_id(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i32>()
        .map(i64::from)
        .map_err(|_| Error::InvalidInput(format!("Item id is not a 32-bit integer: {:?}", raw)))
}

fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    })
}

fn optional_link<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = scalar_string(deserializer)?;
    let value = value.trim();
    if value.is_empty() {
        Ok(None)
    } else {
        Ok(Some(value.to_string()))
    }
}
