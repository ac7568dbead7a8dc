//! Application router.
//!
//! Three route groups:
//! - protected API routes under `/api/` — session required
//! - public API routes under `/api/` — registration and open directories
//! - page-shell routes — fenced by the role-based access gate
//!
//! Middleware uses `Extension<ApiContext>` (injected as the outermost
//! layer); endpoint handlers use `State<ApiContext>`.

use axum::routing::{get, post};
use axum::Router;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

pub fn app_router(ctx: ApiContext) -> Router {
    // Protected API routes — session resolved by require_session.
    //
    // Layers are applied from bottom (innermost) to top (outermost):
    //   Extension (outermost) → require_session → Handler
    let protected = Router::new()
        .route(
            "/event",
            post(endpoints::events::create).get(endpoints::events::mine),
        )
        .route(
            "/report",
            post(endpoints::reports::create).get(endpoints::reports::list),
        )
        .route(
            "/booking-link",
            get(endpoints::providers::booking_link)
                .post(endpoints::providers::save_booking_link),
        )
        .route("/coach", post(endpoints::coach::generate))
        .route("/lens", post(endpoints::lens::analyze))
        .route("/medical-doc", post(endpoints::medical_doc::analyze))
        .route("/translate", post(endpoints::translate::translate))
        .with_state(ctx.clone())
        .layer(axum::middleware::from_fn(middleware::auth::require_session))
        .layer(axum::Extension(ctx.clone()));

    // Public API routes — no session required.
    let public = Router::new()
        .route("/user", post(endpoints::register::register))
        .route("/health-providers", get(endpoints::providers::directory))
        .route("/event/all", get(endpoints::events::all))
        .route("/event/:id", get(endpoints::events::detail))
        .route("/report/:id", get(endpoints::reports::detail))
        .with_state(ctx.clone());

    // Page shells — every request passes the access gate first.
    let pages = Router::new()
        .route("/", get(endpoints::pages::landing))
        .route("/p", get(endpoints::pages::patient_area))
        .route("/p/dashboard", get(endpoints::pages::patient_area))
        .route("/p/*rest", get(endpoints::pages::patient_area))
        .route("/d", get(endpoints::pages::provider_area))
        .route("/d/dashboard", get(endpoints::pages::provider_area))
        .route("/d/*rest", get(endpoints::pages::provider_area))
        .route("/n", get(endpoints::pages::ngo_area))
        .route("/n/dashboard", get(endpoints::pages::ngo_area))
        .route("/n/*rest", get(endpoints::pages::ngo_area))
        .layer(axum::middleware::from_fn(middleware::gate::enforce))
        .layer(axum::Extension(ctx.clone()));

    Router::new()
        .nest("/api", protected)
        .nest("/api", public)
        .merge(pages)
}
