//! HTTP handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::Local;

use super::types::{AppState, OutagesQuery};
use crate::storage::{query_outages, OutageFilter};

const INDEX_HTML: &str = include_str!("../../templates/index.html");

/// Outage map page.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Outages dated `from` (default today) or later, as JSON.
pub async fn outages_handler(
    State(state): State<AppState>,
    Query(params): Query<OutagesQuery>,
) -> Response {
    let filter = OutageFilter {
        from: Some(params.from.unwrap_or_else(|| Local::now().date_naive())),
        utility_type: params.utility_type,
        emergency: params.emergency,
    };

    match query_outages(&state.pool, &filter).await {
        Ok(outages) => Json(outages).into_response(),
        Err(e) => {
            log::error!("Failed to query outages: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to query outages: {}", e),
            )
                .into_response()
        }
    }
}
