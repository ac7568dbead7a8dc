//! Page-shell handlers for the role namespaces.
//!
//! The real UI is a separate client; these stand in for the shell the
//! gate protects, so namespace routes exist for the redirect rules to
//! act on.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct PageShell {
    pub page: &'static str,
}

pub async fn landing() -> Json<PageShell> {
    Json(PageShell { page: "landing" })
}

pub async fn patient_area() -> Json<PageShell> {
    Json(PageShell { page: "patient" })
}

pub async fn provider_area() -> Json<PageShell> {
    Json(PageShell { page: "provider" })
}

pub async fn ngo_area() -> Json<PageShell> {
    Json(PageShell { page: "ngo" })
}
