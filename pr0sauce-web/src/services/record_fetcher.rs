//! GraphQL item lookup
//!
//! Issues the `GetItem` query against the configured GraphQL endpoint and
//! returns the matching rows. The backend filters by equality on `item_id`,
//! so at most one row is expected, but duplicates are passed through.

use async_trait::async_trait;
use pr0sauce_common::ItemRecord;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// `GetItem` query document
pub const GET_ITEM_QUERY: &str = r#"query GetItem($id: Int!) {
  item(item_id: $id) {
    id
    item_id
    title
    artist
    album
    url
    acr_id
    provider
    spotify_url
    spotify_id
    youtube_url
    youtube_id
  }
}"#;

const OPERATION_NAME: &str = "GetItem";

/// Record lookup errors
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Query service returned HTTP {0}: {1}")]
    Http(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("Query response contained no data")]
    MissingData,
}

/// Source of item records
#[async_trait]
pub trait RecordFetcher: Send + Sync {
    /// Fetch all records whose `item_id` equals `item_id`
    ///
    /// No retry is performed.
    async fn fetch(&self, item_id: i64) -> Result<Vec<ItemRecord>, QueryError>;
}

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: GetItemVariables,
    #[serde(rename = "operationName")]
    operation_name: &'a str,
}

#[derive(Debug, Serialize)]
struct GetItemVariables {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<GetItemData>,
    #[serde(default)]
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GetItemData {
    #[serde(default)]
    item: Option<Vec<ItemRecord>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// [`RecordFetcher`] backed by a GraphQL-over-HTTP endpoint
pub struct GraphQlRecordFetcher {
    http_client: reqwest::Client,
    endpoint: Url,
}

impl GraphQlRecordFetcher {
    pub fn new(http_client: reqwest::Client, endpoint: Url) -> Self {
        Self {
            http_client,
            endpoint,
        }
    }
}

#[async_trait]
impl RecordFetcher for GraphQlRecordFetcher {
    async fn fetch(&self, item_id: i64) -> Result<Vec<ItemRecord>, QueryError> {
        let request = GraphQlRequest {
            query: GET_ITEM_QUERY,
            variables: GetItemVariables { id: item_id },
            operation_name: OPERATION_NAME,
        };

        debug!(item_id, url = %self.endpoint, "Querying GraphQL endpoint");

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| QueryError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(QueryError::Http(status.as_u16(), error_text));
        }

        let body: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| QueryError::Parse(e.to_string()))?;

        decode_response(body)
    }
}

fn decode_response(body: GraphQlResponse) -> Result<Vec<ItemRecord>, QueryError> {
    if let Some(errors) = body.errors.filter(|errors| !errors.is_empty()) {
        let message = errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(QueryError::GraphQl(message));
    }

    let data = body.data.ok_or(QueryError::MissingData)?;
    Ok(data.item.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> GraphQlResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_request_body_shape() {
        let request = GraphQlRequest {
            query: GET_ITEM_QUERY,
            variables: GetItemVariables { id: 12345 },
            operation_name: OPERATION_NAME,
        };
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["variables"]["id"], 12345);
        assert_eq!(body["operationName"], "GetItem");
        assert!(body["query"].as_str().unwrap().contains("item(item_id: $id)"));
    }

    #[test]
    fn test_decode_rows() {
        let body = parse(json!({
            "data": { "item": [{ "id": 1, "item_id": 12345, "title": "Song" }] }
        }));
        let records = decode_response(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Song");
    }

    #[test]
    fn test_decode_empty_and_null_item() {
        let empty = parse(json!({ "data": { "item": [] } }));
        assert!(decode_response(empty).unwrap().is_empty());

        let null = parse(json!({ "data": { "item": null } }));
        assert!(decode_response(null).unwrap().is_empty());
    }

    #[test]
    fn test_decode_graphql_errors() {
        let body = parse(json!({
            "data": null,
            "errors": [{ "message": "field 'item' not found" }, { "message": "second" }]
        }));
        match decode_response(body) {
            Err(QueryError::GraphQl(msg)) => assert_eq!(msg, "field 'item' not found; second"),
            other => panic!("Expected GraphQl error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_missing_data() {
        let body = parse(json!({}));
        assert!(matches!(decode_response(body), Err(QueryError::MissingData)));
    }
}
