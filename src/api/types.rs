//! Shared types for the API layer.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use uuid::Uuid;

use crate::ai::AiClient;
use crate::models::Role;
use crate::storage::ObjectStore;

// ═══════════════════════════════════════════════════════════
// API context — shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared context for all routes and middleware: the document store, the
/// session store, and the external-service clients.
#[derive(Clone)]
pub struct ApiContext {
    pub db: Arc<Mutex<Connection>>,
    pub sessions: Arc<Mutex<SessionStore>>,
    pub ai: Arc<dyn AiClient>,
    pub store: Arc<dyn ObjectStore>,
}

impl ApiContext {
    pub fn new(
        db: Connection,
        ai: Arc<dyn AiClient>,
        store: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            sessions: Arc::new(Mutex::new(SessionStore::new())),
            ai,
            store,
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Session context — injected by the auth middleware
// ═══════════════════════════════════════════════════════════

/// Authenticated caller, injected into request extensions after the
/// session token resolves. The core consumes `{user_id, role}` from a
/// verified session; it never re-validates credentials itself.
#[derive(Debug, Clone, Copy)]
pub struct SessionContext {
    pub user_id: Uuid,
    pub role: Role,
}

// ═══════════════════════════════════════════════════════════
// Session store
// ═══════════════════════════════════════════════════════════

/// Hash a bearer token string using SHA-256.
pub fn hash_token(token: &str) -> [u8; 32] {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hasher.finalize().into()
}

/// Generate a random bearer token (URL-safe base64, 32 bytes of entropy).
pub fn generate_token() -> String {
    use base64::Engine;
    let bytes: [u8; 32] = rand::random();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

/// In-memory session store keyed by token hash. Issuance belongs to the
/// identity provider; this is the resolution side the gate consumes.
pub struct SessionStore {
    sessions: HashMap<[u8; 32], SessionContext>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// Register a verified session and return its bearer token.
    pub fn issue(&mut self, user_id: Uuid, role: Role) -> String {
        let token = generate_token();
        self.sessions
            .insert(hash_token(&token), SessionContext { user_id, role });
        token
    }

    /// Resolve a presented token to its session, if any.
    pub fn resolve(&self, token: &str) -> Option<SessionContext> {
        self.sessions.get(&hash_token(token)).copied()
    }

    pub fn revoke(&mut self, token: &str) {
        self.sessions.remove(&hash_token(token));
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the session token from a request: `Authorization: Bearer`
/// first, then a `session` cookie.
pub fn session_token(headers: &axum::http::HeaderMap) -> Option<String> {
    if let Some(token) = headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        return Some(token.to_string());
    }

    headers
        .get("Cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(|cookies| {
            cookies.split(';').map(str::trim).find_map(|pair| {
                pair.strip_prefix("session=").map(str::to_string)
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_token_is_unique() {
        let t1 = generate_token();
        let t2 = generate_token();
        assert_ne!(t1, t2);
        assert!(!t1.is_empty());
    }

    #[test]
    fn hash_token_is_deterministic() {
        assert_eq!(hash_token("test"), hash_token("test"));
        assert_ne!(hash_token("token-a"), hash_token("token-b"));
    }

    #[test]
    fn session_issue_and_resolve() {
        let mut store = SessionStore::new();
        let user_id = Uuid::new_v4();
        let token = store.issue(user_id, Role::Patient);

        let session = store.resolve(&token).unwrap();
        assert_eq!(session.user_id, user_id);
        assert_eq!(session.role, Role::Patient);
    }

    #[test]
    fn unknown_token_does_not_resolve() {
        let store = SessionStore::new();
        assert!(store.resolve("not-a-token").is_none());
    }

    #[test]
    fn revoked_token_does_not_resolve() {
        let mut store = SessionStore::new();
        let token = store.issue(Uuid::new_v4(), Role::Ngo);
        store.revoke(&token);
        assert!(store.resolve(&token).is_none());
    }

    #[test]
    fn session_token_prefers_bearer_header() {
        let mut headers = axum::http::HeaderMap::new();
        headers.insert("Authorization", "Bearer abc123".parse().unwrap());
        headers.insert("Cookie", "session=cookie-token".parse().unwrap());
        assert_eq!(session_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn session_token_falls_back_to_cookie() {
        let mut headers = axum::http::HeaderMap::new();
        headers.insert("Cookie", "theme=dark; session=cookie-token".parse().unwrap());
        assert_eq!(session_token(&headers).as_deref(), Some("cookie-token"));
    }

    #[test]
    fn session_token_absent() {
        let headers = axum::http::HeaderMap::new();
        assert!(session_token(&headers).is_none());
    }
}
