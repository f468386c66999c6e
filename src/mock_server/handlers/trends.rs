//! Trend endpoint handlers.
//!
//! Each endpoint answers in the payload shape the real API uses for it:
//! a single object for global trends, date-keyed objects for current, daily
//! and weekly trends, and an array for local trends.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Duration, Utc};
use serde_json::{json, Map, Value};

use super::{error_response, SharedState};

const DATE_KEY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// GET /trends.json
pub async fn global_trends(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    Json(json!({
        "as_of": Utc::now().to_rfc2822(),
        "trends": state.trends,
    }))
}

/// GET /trends/current.json
pub async fn current_trends(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    Json(date_keyed(&state.trends, 1, Duration::hours(1)))
}

/// GET /trends/daily.json
pub async fn daily_trends(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    Json(date_keyed(&state.trends, 24, Duration::hours(1)))
}

/// GET /trends/weekly.json
pub async fn weekly_trends(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    Json(date_keyed(&state.trends, 7, Duration::days(1)))
}

/// GET /trends/available.json
pub async fn available_trends(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    let locations: Vec<_> = state.locations.values().cloned().collect();
    Json(locations)
}

/// GET /trends/{woeid}.json
pub async fn local_trends(
    State(state): State<SharedState>,
    Path(segment): Path<String>,
) -> impl IntoResponse {
    let woeid = segment
        .strip_suffix(".json")
        .unwrap_or(&segment)
        .parse::<u64>()
        .ok();
    let state = state.read().await;

    match woeid.and_then(|w| state.locations.get(&w)) {
        Some(location) => (
            StatusCode::OK,
            Json(json!([{
                "as_of": Utc::now().to_rfc2822(),
                "created_at": Utc::now().to_rfc2822(),
                "trends": state.trends,
                "locations": [{"woeid": location.woeid, "name": location.name}],
            }])),
        )
            .into_response(),
        None => error_response(StatusCode::NOT_FOUND, "/trends", "Not found"),
    }
}

/// `{"as_of": <epoch>, "trends": {"<date>": [..], ..}}` with `slots` entries
/// spaced `step` apart, most recent last.
fn date_keyed(trends: &[crate::Trend], slots: i32, step: Duration) -> Value {
    let now = Utc::now();
    let mut by_date = Map::new();
    for slot in 0..slots {
        let at = now - step * (slots - 1 - slot);
        by_date.insert(at.format(DATE_KEY_FORMAT).to_string(), json!(trends));
    }
    json!({
        "as_of": now.timestamp(),
        "trends": by_date,
    })
}
