//! Account endpoint handlers: credentials, rate limits and profile updates.

use std::collections::HashMap;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Form, Json,
};

use super::{error_response, SharedState};

/// GET /account/verify_credentials.json
pub async fn verify_credentials(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;

    match state.me() {
        Some(user) => (StatusCode::OK, Json(user.clone())).into_response(),
        None => error_response(
            StatusCode::UNAUTHORIZED,
            "/account/verify_credentials.json",
            "Could not authenticate you.",
        ),
    }
}

/// GET /account/rate_limit_status
pub async fn rate_limit_status(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    Json(state.rate_limit())
}

/// POST /account/update_profile
pub async fn update_profile(
    State(state): State<SharedState>,
    Form(form): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    let mut state = state.write().await;
    let id = state.authenticated_user;

    let Some(user) = state.users.get_mut(&id) else {
        return error_response(
            StatusCode::UNAUTHORIZED,
            "/account/update_profile",
            "Could not authenticate you.",
        );
    };

    for (key, value) in form {
        match key.as_str() {
            "name" => user.name = value,
            "url" => user.url = Some(value),
            "location" => user.location = Some(value),
            "description" => user.description = Some(value),
            _ => {}
        }
    }
    (StatusCode::OK, Json(user.clone())).into_response()
}

/// POST /account/update_profile_colors
pub async fn update_profile_colors(
    State(state): State<SharedState>,
    Form(form): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    let mut state = state.write().await;
    let id = state.authenticated_user;

    let Some(user) = state.users.get_mut(&id) else {
        return error_response(
            StatusCode::UNAUTHORIZED,
            "/account/update_profile_colors",
            "Could not authenticate you.",
        );
    };

    for (key, value) in form {
        let field = match key.as_str() {
            "profile_background_color" => &mut user.profile_background_color,
            "profile_text_color" => &mut user.profile_text_color,
            "profile_link_color" => &mut user.profile_link_color,
            "profile_sidebar_fill_color" => &mut user.profile_sidebar_fill_color,
            "profile_sidebar_border_color" => &mut user.profile_sidebar_border_color,
            _ => continue,
        };
        *field = Some(value);
    }
    (StatusCode::OK, Json(user.clone())).into_response()
}

/// POST /account/update_delivery_device
pub async fn update_delivery_device(
    State(state): State<SharedState>,
    Form(form): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    let device = form.get("device").map(String::as_str);
    if !matches!(device, Some("sms" | "im" | "none")) {
        return error_response(
            StatusCode::BAD_REQUEST,
            "/account/update_delivery_device",
            "device must be one of: sms, im, none",
        );
    }

    let state = state.read().await;
    match state.me() {
        Some(user) => (StatusCode::OK, Json(user.clone())).into_response(),
        None => error_response(
            StatusCode::UNAUTHORIZED,
            "/account/update_delivery_device",
            "Could not authenticate you.",
        ),
    }
}
