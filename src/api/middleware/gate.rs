//! Role-based access gate.
//!
//! Single chokepoint deciding, per request, whether the caller may
//! proceed or gets redirected to a role-appropriate path. Each role owns
//! exactly one top-level namespace; cross-namespace access is always
//! redirected, never merely rejected.
//!
//! Stateless per request; the only output is the redirect decision.

use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use crate::api::error::ApiError;
use crate::api::types::{session_token, ApiContext};
use crate::models::Role;

/// The public landing path — role-neutral, so authenticated callers are
/// redirected away from it to their own dashboard.
pub const LANDING_PATH: &str = "/";

/// Declarative routing policy: each role's exclusive namespace and its
/// dashboard. Every `Role` variant has exactly one row, so a role without
/// a namespace rule cannot exist.
const NAMESPACE_POLICY: &[(Role, &str, &str)] = &[
    (Role::Patient, "/p", "/p/dashboard"),
    (Role::HealthcareProvider, "/d", "/d/dashboard"),
    (Role::Ngo, "/n", "/n/dashboard"),
];

fn namespace_owner(path: &str) -> Option<Role> {
    NAMESPACE_POLICY
        .iter()
        .find(|(_, ns, _)| path == *ns || path.starts_with(&format!("{ns}/")))
        .map(|(role, _, _)| *role)
}

pub fn dashboard_path(role: Role) -> &'static str {
    NAMESPACE_POLICY
        .iter()
        .find(|(r, _, _)| *r == role)
        .map(|(_, _, dashboard)| *dashboard)
        .expect("every role has a policy row")
}

/// The gate's verdict for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Pass,
    Redirect(&'static str),
}

/// The reusable authorization predicate.
///
/// Rule 1: no valid role + path under any restricted namespace → the
/// landing path. Rule 2: role R + path under a namespace not owned by R,
/// or the landing path itself → R's dashboard.
pub fn decide(path: &str, role: Option<Role>) -> GateDecision {
    let owner = namespace_owner(path);

    match role {
        None => match owner {
            Some(_) => GateDecision::Redirect(LANDING_PATH),
            None => GateDecision::Pass,
        },
        Some(role) => {
            let foreign_namespace = owner.is_some_and(|o| o != role);
            if foreign_namespace || path == LANDING_PATH {
                GateDecision::Redirect(dashboard_path(role))
            } else {
                GateDecision::Pass
            }
        }
    }
}

/// Axum middleware wrapping `decide`. Resolves the session (absent or
/// unparsable tokens count as unauthenticated) and either passes the
/// request through untouched or responds with a redirect.
pub async fn enforce(req: Request<axum::body::Body>, next: Next) -> Response {
    match enforce_inner(req, next).await {
        Ok(resp) => resp,
        Err(err) => err.into_response(),
    }
}

async fn enforce_inner(
    req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let ctx: ApiContext = req
        .extensions()
        .get::<ApiContext>()
        .cloned()
        .ok_or(ApiError::Internal("missing API context".into()))?;

    let role = session_token(req.headers()).and_then(|token| {
        let sessions = ctx.sessions.lock().ok()?;
        sessions.resolve(&token).map(|session| session.role)
    });

    match decide(req.uri().path(), role) {
        GateDecision::Pass => Ok(next.run(req).await),
        GateDecision::Redirect(target) => Ok(Redirect::to(target).into_response()),
    }
}
