//! services/api/src/web/middleware.rs
//!
//! Authentication middleware for protecting routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::warn;

use crate::web::cookie::{read_cookie, AUTH_COOKIE};
use crate::web::error::HttpError;
use crate::web::state::AppState;

/// Middleware that verifies the token cookie and extracts the identity claim.
///
/// If valid, inserts the `IdentityClaim` into request extensions for handlers to use.
/// If missing or invalid, returns 401 Unauthorized.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, HttpError> {
    // 1. Extract the token cookie
    let token = read_cookie(req.headers(), AUTH_COOKIE).ok_or(HttpError::Unauthorized)?;

    // 2. Verify the token, recovering the claim
    let claim = state.tokens.verify(token).map_err(|e| {
        warn!("Rejected credential: {}", e);
        HttpError::Unauthorized
    })?;

    // 3. Insert the claim into request extensions
    req.extensions_mut().insert(claim);

    // 4. Continue to the handler
    Ok(next.run(req).await)
}
