//! Cover art lookup via Spotify oEmbed
//!
//! `GET <endpoint>?url=spotify:track:<id>` returns a JSON body carrying
//! either `thumbnail_url` or an `error` object.

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Artwork lookup errors
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Lookup service returned HTTP {0}")]
    Http(u16),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Lookup service error: {0}")]
    Service(String),

    #[error("Response has no thumbnail_url")]
    MissingThumbnail,
}

/// Source of cover art URLs
#[async_trait]
pub trait ArtworkResolver: Send + Sync {
    /// Resolve a Spotify track id to a thumbnail URL
    ///
    /// Callers only pass non-empty ids.
    async fn resolve(&self, spotify_id: &str) -> Result<String, LookupError>;
}

#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    #[serde(default)]
    thumbnail_url: Option<String>,
    #[serde(default)]
    error: Option<Value>,
}

/// [`ArtworkResolver`] backed by the Spotify oEmbed endpoint
pub struct SpotifyOEmbedResolver {
    http_client: reqwest::Client,
    endpoint: Url,
}

impl SpotifyOEmbedResolver {
    pub fn new(http_client: reqwest::Client, endpoint: Url) -> Self {
        Self {
            http_client,
            endpoint,
        }
    }

    /// Lookup URL for one track
    pub fn lookup_url(&self, spotify_id: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("url", &format!("spotify:track:{}", spotify_id));
        url
    }
}

#[async_trait]
impl ArtworkResolver for SpotifyOEmbedResolver {
    async fn resolve(&self, spotify_id: &str) -> Result<String, LookupError> {
        let url = self.lookup_url(spotify_id);

        debug!(spotify_id = %spotify_id, url = %url, "Querying oEmbed endpoint");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        match serde_json::from_slice::<OEmbedResponse>(&bytes) {
            Ok(body) => {
                // An error body wins over the status code, it carries the message
                if let Some(error) = body.error {
                    return Err(LookupError::Service(error_message(&error)));
                }
                if !status.is_success() {
                    return Err(LookupError::Http(status.as_u16()));
                }
                body.thumbnail_url
                    .filter(|url| !url.trim().is_empty())
                    .ok_or(LookupError::MissingThumbnail)
            }
            Err(_) if !status.is_success() => Err(LookupError::Http(status.as_u16())),
            Err(e) => Err(LookupError::Parse(e.to_string())),
        }
    }
}

fn error_message(error: &Value) -> String {
    match error {
        Value::String(message) => message.clone(),
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_url_encodes_track_uri() {
        let resolver = SpotifyOEmbedResolver::new(
            reqwest::Client::new(),
            Url::parse("https://open.spotify.com/oembed").unwrap(),
        );

        assert_eq!(
            resolver.lookup_url("abc123").as_str(),
            "https://open.spotify.com/oembed?url=spotify%3Atrack%3Aabc123"
        );
    }

    #[test]
    fn test_error_message_shapes() {
        assert_eq!(error_message(&json!({ "message": "not found" })), "not found");
        assert_eq!(error_message(&json!("bad request")), "bad request");
        assert_eq!(error_message(&json!({ "status": 404 })), r#"{"status":404}"#);
    }
}
