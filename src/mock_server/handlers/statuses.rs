//! Status endpoint handlers.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Form, Json,
};
use serde::Deserialize;

use super::{error_response, user_ref_from_segment, SharedState};

/// `?id=` query used by show and destroy.
#[derive(Debug, Deserialize)]
pub struct StatusIdQuery {
    pub id: u64,
}

/// GET /statuses/show.json
pub async fn show_status(
    State(state): State<SharedState>,
    Query(query): Query<StatusIdQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    match state.get_status(query.id) {
        Some(status) => (StatusCode::OK, Json(status.clone())).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            "/statuses/show.json",
            "No status found with that ID.",
        ),
    }
}

/// POST /statuses/update.json
pub async fn update_status(
    State(state): State<SharedState>,
    Form(form): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    let text = match form.get("status").filter(|s| !s.is_empty()) {
        Some(text) => text.clone(),
        None => {
            return error_response(
                StatusCode::FORBIDDEN,
                "/statuses/update.json",
                "Status is empty.",
            )
        }
    };
    let in_reply_to = form
        .get("in_reply_to_status_id")
        .and_then(|id| id.parse().ok());

    let mut state = state.write().await;
    let status = state.post_status(text, form.get("source").cloned(), in_reply_to);
    (StatusCode::OK, Json(status)).into_response()
}

/// DELETE /statuses/destroy.json
pub async fn destroy_status(
    State(state): State<SharedState>,
    Query(query): Query<StatusIdQuery>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    match state.destroy_status(query.id) {
        Some(status) => (StatusCode::OK, Json(status)).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            "/statuses/destroy.json",
            "No status found with that ID.",
        ),
    }
}

/// GET /statuses/friends/{user}.json
pub async fn list_friends(
    State(state): State<SharedState>,
    Path(segment): Path<String>,
) -> impl IntoResponse {
    let state = state.read().await;

    match state.find_user(&user_ref_from_segment(&segment)) {
        Some(user) => (StatusCode::OK, Json(state.friends_of(user.id))).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "/statuses/friends", "Not found"),
    }
}

/// GET /statuses/followers/{user}.json
pub async fn list_followers(
    State(state): State<SharedState>,
    Path(segment): Path<String>,
) -> impl IntoResponse {
    let state = state.read().await;

    match state.find_user(&user_ref_from_segment(&segment)) {
        Some(user) => (StatusCode::OK, Json(state.followers_of(user.id))).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "/statuses/followers", "Not found"),
    }
}
