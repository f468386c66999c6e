//! Friendship endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::{error_response, user_ref_from_segment, SharedState};
use crate::IdList;

/// POST /friendships/create/{user}.json
pub async fn create_friendship(
    State(state): State<SharedState>,
    Path(segment): Path<String>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    match state.set_following(&user_ref_from_segment(&segment), true) {
        Some(user) => (StatusCode::OK, Json(user)).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            "/friendships/create",
            "Not found",
        ),
    }
}

/// POST /friendships/destroy/{user}.json
pub async fn destroy_friendship(
    State(state): State<SharedState>,
    Path(segment): Path<String>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    match state.set_following(&user_ref_from_segment(&segment), false) {
        Some(user) => (StatusCode::OK, Json(user)).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            "/friendships/destroy",
            "Not found",
        ),
    }
}

/// GET /friendships/incoming.json
pub async fn incoming_friendships(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    Json(IdList {
        ids: state.incoming.clone(),
        ..Default::default()
    })
}

/// GET /friendships/outgoing.json
pub async fn outgoing_friendships(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    Json(IdList {
        ids: state.outgoing.clone(),
        ..Default::default()
    })
}
