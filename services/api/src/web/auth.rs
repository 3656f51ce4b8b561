//! services/api/src/web/auth.rs
//!
//! Credential endpoints: issue the token cookie and clear it on logout.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::token::IdentityClaim;
use crate::web::cookie::{auth_cookie, cleared_auth_cookie};
use crate::web::error::HttpError;
use crate::web::rest::SuccessResponse;
use crate::web::state::AppState;

/// POST /jwt - Issue a token for the posted identity and set it as a cookie
#[utoipa::path(
    post,
    path = "/jwt",
    request_body(content_type = "application/json", description = "Identity payload, usually `{\"email\": ...}`."),
    responses(
        (status = 200, description = "Token cookie set", body = SuccessResponse),
        (status = 422, description = "Body is not a JSON object"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn issue_token_handler(
    State(state): State<Arc<AppState>>,
    Json(claim): Json<IdentityClaim>,
) -> Result<impl IntoResponse, HttpError> {
    // 1. Sign the claim
    let email = claim.email().unwrap_or_default().to_string();
    let token = state.tokens.issue(claim)?;

    // 2. Wrap it in an HTTP-only cookie living as long as the token
    let cookie = auth_cookie(&token, state.tokens.ttl(), state.config.environment);
    info!("Issued token for '{}'", email);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(SuccessResponse::ok()),
    ))
}

/// POST /logout - Clear the token cookie
///
/// Tokens are stateless, so a copy of the token kept elsewhere stays valid
/// until it expires.
#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 200, description = "Token cookie cleared", body = SuccessResponse)
    )
)]
pub async fn logout_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let cookie = cleared_auth_cookie(state.config.environment);
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(SuccessResponse::ok()),
    )
}
