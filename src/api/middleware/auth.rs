//! Session-resolution middleware for protected API routes.
//!
//! Resolves the bearer token (or session cookie) against the session
//! store and injects `SessionContext` into request extensions for
//! downstream handlers. Absent or invalid sessions are rejected before
//! any store mutation.

use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::api::error::ApiError;
use crate::api::types::{session_token, ApiContext, SessionContext};

pub async fn require_session(req: Request<axum::body::Body>, next: Next) -> Response {
    match require_session_inner(req, next).await {
        Ok(resp) => resp,
        Err(err) => err.into_response(),
    }
}

async fn require_session_inner(
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx: ApiContext = req
        .extensions()
        .get::<ApiContext>()
        .cloned()
        .ok_or(ApiError::Internal("missing API context".into()))?;

    let token = session_token(req.headers()).ok_or(ApiError::Unauthorized)?;

    let session: SessionContext = {
        let sessions = ctx
            .sessions
            .lock()
            .map_err(|_| ApiError::Internal("session store lock".into()))?;
        sessions.resolve(&token).ok_or(ApiError::Unauthorized)?
    }; // MutexGuard dropped here, before any .await

    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}
