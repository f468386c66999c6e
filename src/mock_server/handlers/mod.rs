//! HTTP request handlers for the mock server.

pub mod account;
pub mod friendships;
pub mod search;
pub mod statuses;
pub mod trends;
pub mod users;

pub use account::*;
pub use friendships::*;
pub use search::*;
pub use statuses::*;
pub use trends::*;
pub use users::*;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;
use crate::UserRef;

pub type SharedState = Arc<RwLock<MockState>>;

/// Twitter-style error body: `{"request": ..., "error": ...}`.
pub fn error_response(status: StatusCode, request: &str, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "request": request,
            "error": message,
        })),
    )
        .into_response()
}

/// Parse the `<id-or-screen-name>.json` path segment.
pub fn user_ref_from_segment(segment: &str) -> UserRef {
    let value = segment.strip_suffix(".json").unwrap_or(segment);
    match value.parse::<u64>() {
        Ok(id) => UserRef::Id(id),
        Err(_) => UserRef::ScreenName(value.to_string()),
    }
}
