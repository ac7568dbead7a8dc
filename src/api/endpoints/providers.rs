//! Provider directory and consultation booking link.
//!
//! - `GET /api/health-providers` — public directory (join + projection)
//! - `GET /api/booking-link` — the caller's booking link
//! - `POST /api/booking-link` — atomic single-document update

use axum::extract::{Multipart, State};
use axum::{Extension, Json};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, SessionContext};
use crate::db;
use crate::models::ProviderView;

use super::{collect_form, AckResponse};

#[derive(Serialize)]
pub struct ProvidersResponse {
    pub message: String,
    pub success: bool,
    pub providers: Vec<ProviderView>,
}

pub async fn directory(
    State(ctx): State<ApiContext>,
) -> Result<Json<ProvidersResponse>, ApiError> {
    let providers = {
        let conn = ctx
            .db
            .lock()
            .map_err(|_| ApiError::Internal("db lock".into()))?;
        db::list_providers(&conn)?
    };

    Ok(Json(ProvidersResponse {
        message: "Health Providers fetched".into(),
        success: true,
        providers,
    }))
}

#[derive(Serialize)]
pub struct BookingLinkResponse {
    pub message: String,
    pub success: bool,
    pub link: String,
}

pub async fn booking_link(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
) -> Result<Json<BookingLinkResponse>, ApiError> {
    let link = {
        let conn = ctx
            .db
            .lock()
            .map_err(|_| ApiError::Internal("db lock".into()))?;
        db::get_provider_by_user(&conn, &session.user_id)?
            .map(|provider| provider.booking_link)
            .unwrap_or_default()
    };

    Ok(Json(BookingLinkResponse {
        message: "Link fetched".into(),
        success: true,
        link,
    }))
}

pub async fn save_booking_link(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    multipart: Multipart,
) -> Result<Json<AckResponse>, ApiError> {
    let form = collect_form(multipart).await?;
    let Some(link) = form.get("booking_link") else {
        return Err(ApiError::BadRequest("Missing required fields".into()));
    };

    let updated = {
        let conn = ctx
            .db
            .lock()
            .map_err(|_| ApiError::Internal("db lock".into()))?;
        db::update_booking_link(&conn, &session.user_id, link)?
    };

    if !updated {
        return Err(ApiError::NotFound("Provider profile not found".into()));
    }
    Ok(Json(AckResponse::new("Link Updated")))
}
