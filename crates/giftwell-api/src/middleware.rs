use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use giftwell_core::CoreError;
use giftwell_core::identity::IdentityProvider;

use crate::auth::AppState;
use crate::error::ApiError;

/// The verified caller, inserted as a request extension by `require_auth`.
#[derive(Debug, Clone)]
pub struct AuthUser(pub String);

/// Verify the bearer token through the identity provider before any handler
/// runs. A missing or bad token is an authentication failure; nothing below
/// this layer sees the request.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(CoreError::Unauthenticated)?;

    let uid = state.identity.verify_token(auth_header)?;
    debug!(uid, method = %req.method(), uri = %req.uri(), "authenticated request");

    req.extensions_mut().insert(AuthUser(uid));
    Ok(next.run(req).await)
}
