//! JSON item endpoint
//!
//! Same resolution as the HTML page, serialized as
//! `{"status": "success" | "not_found" | "error", ...}`.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::{IntoResponse, Response},
    Json,
};
use pr0sauce_common::models::parse_item_id;

use super::ui::status_for;
use crate::error::ApiResult;
use crate::AppState;

/// GET /api/item/:id
pub async fn get_item(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Response> {
    let Path(raw_id) = path?;
    let item_id = parse_item_id(&raw_id)?;

    let resolution = state.resolver.resolve(item_id).await;
    Ok((status_for(&resolution), Json(resolution)).into_response())
}
