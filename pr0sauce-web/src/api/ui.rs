//! UI routes
//!
//! Server-rendered HTML pages. An id that is not an integer (or a path
//! segment that does not even decode) never reaches the resolver; the
//! request is redirected to the landing page instead.

use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use pr0sauce_common::models::parse_item_id;
use serde::Deserialize;
use tracing::debug;

use crate::services::Resolution;
use crate::{view, AppState};

/// Query parameters of the landing page form
#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    #[serde(default)]
    pub id: String,
}

/// HTTP status matching a resolution state
pub fn status_for(resolution: &Resolution) -> StatusCode {
    match resolution {
        Resolution::Success { .. } => StatusCode::OK,
        Resolution::NotFound => StatusCode::NOT_FOUND,
        Resolution::Error { .. } => StatusCode::BAD_GATEWAY,
        Resolution::Loading => StatusCode::ACCEPTED,
    }
}

/// GET /
///
/// Landing page
pub async fn serve_index() -> Html<String> {
    Html(view::render_index())
}

/// GET /lookup?id=ID
///
/// Form target, forwards to the item page
pub async fn lookup_redirect(Query(query): Query<LookupQuery>) -> Redirect {
    match parse_item_id(&query.id) {
        Ok(item_id) => Redirect::to(&format!("/{}", item_id)),
        Err(_) => Redirect::to("/"),
    }
}

/// GET /:id
///
/// Item detail page
pub async fn serve_item_page(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    let parsed = match path {
        Ok(Path(raw_id)) => parse_item_id(&raw_id).map_err(|e| e.to_string()),
        Err(rejection) => Err(rejection.body_text()),
    };
    let item_id = match parsed {
        Ok(item_id) => item_id,
        Err(reason) => {
            debug!("Redirecting to landing page: {}", reason);
            return Redirect::to("/").into_response();
        }
    };

    let resolution = state.resolver.resolve(item_id).await;
    (status_for(&resolution), Html(view::render_resolution(&resolution))).into_response()
}
