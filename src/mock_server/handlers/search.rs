//! Search endpoint handler.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use super::{error_response, SharedState};

/// Query parameters for search.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub from: Option<String>,
    pub rpp: Option<usize>,
    pub page: Option<usize>,
}

/// GET /search.json
pub async fn search(
    State(state): State<SharedState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    let Some(q) = query.q.or(query.from) else {
        return error_response(StatusCode::FORBIDDEN, "/search.json", "You must enter a query.");
    };

    let state = state.read().await;

    let rpp = query.rpp.unwrap_or(15).max(1);
    let page = query.page.unwrap_or(1).max(1);
    let results: Vec<_> = state
        .search(&q)
        .into_iter()
        .skip((page - 1) * rpp)
        .take(rpp)
        .collect();

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "results": results,
            "query": q,
            "page": page,
            "results_per_page": rpp,
        })),
    )
        .into_response()
}
