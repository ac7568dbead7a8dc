//! HTTP API layer.
//!
//! Every request passes the role-based access gate; protected API routes
//! additionally resolve the session into a `SessionContext`. Handlers
//! return `{message, success, ...}` / `{message, error}` shaped JSON with
//! conventional status codes.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::app_router;
pub use server::{start_server, ApiServer, ApiSession};
pub use types::{ApiContext, SessionContext, SessionStore};
