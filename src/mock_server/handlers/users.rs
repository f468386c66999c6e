//! User endpoint handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use super::{error_response, SharedState};
use crate::UserRef;

/// Query parameters for `users/show`.
#[derive(Debug, Default, Deserialize)]
pub struct ShowUserQuery {
    pub user_id: Option<u64>,
    pub screen_name: Option<String>,
}

/// GET /users/show.json
pub async fn show_user(
    State(state): State<SharedState>,
    Query(query): Query<ShowUserQuery>,
) -> impl IntoResponse {
    let user_ref = match (query.user_id, query.screen_name) {
        (Some(id), _) => UserRef::Id(id),
        (None, Some(name)) => UserRef::ScreenName(name),
        (None, None) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "/users/show.json",
                "Either user_id or screen_name is required.",
            )
        }
    };

    let state = state.read().await;
    match state.find_user(&user_ref) {
        Some(user) => (StatusCode::OK, Json(user.clone())).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "/users/show.json", "Not found"),
    }
}
