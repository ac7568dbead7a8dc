//! Community health-event endpoints.
//!
//! - `POST /api/event` — list a new event (session required)
//! - `GET /api/event` — events listed by the caller (session required)
//! - `GET /api/event/all` — public listing
//! - `GET /api/event/:id` — public detail

use axum::extract::{Multipart, Path, State};
use axum::{Extension, Json};
use chrono::Utc;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, SessionContext};
use crate::db;
use crate::models::*;

use super::{collect_form, AckResponse};

pub async fn create(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
    multipart: Multipart,
) -> Result<Json<AckResponse>, ApiError> {
    let form = collect_form(multipart).await?;

    let (Some(name), Some(event_date), Some(location_raw), Some(description)) = (
        form.get("name"),
        form.get("event_date"),
        form.get("location"),
        form.get("location_description"),
    ) else {
        return Err(ApiError::BadRequest("Missing required fields".into()));
    };

    let location = GeoPoint::parse_form(location_raw)?;

    let now = Utc::now();
    let event = Event {
        id: Uuid::new_v4(),
        name: name.into(),
        event_date: event_date.into(),
        listed_by: session.user_id,
        location,
        location_description: description.into(),
        created_at: now,
        updated_at: now,
    };

    {
        let conn = ctx
            .db
            .lock()
            .map_err(|_| ApiError::Internal("db lock".into()))?;
        db::insert_event(&conn, &event)?;
    }

    Ok(Json(AckResponse::new("Event listed successfully")))
}

/// Events listed by the authenticated caller.
pub async fn mine(
    State(ctx): State<ApiContext>,
    Extension(session): Extension<SessionContext>,
) -> Result<Json<Vec<EventView>>, ApiError> {
    let conn = ctx
        .db
        .lock()
        .map_err(|_| ApiError::Internal("db lock".into()))?;
    let events = db::list_events_by_owner(&conn, &session.user_id)?;
    Ok(Json(events))
}

pub async fn all(State(ctx): State<ApiContext>) -> Result<Json<Vec<EventView>>, ApiError> {
    let conn = ctx
        .db
        .lock()
        .map_err(|_| ApiError::Internal("db lock".into()))?;
    let events = db::list_events(&conn)?;
    Ok(Json(events))
}

pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(event_id): Path<String>,
) -> Result<Json<EventView>, ApiError> {
    let id = Uuid::parse_str(&event_id)
        .map_err(|_| ApiError::BadRequest("Invalid event ID".into()))?;

    let conn = ctx
        .db
        .lock()
        .map_err(|_| ApiError::Internal("db lock".into()))?;
    let event = db::get_event(&conn, &id)?
        .ok_or_else(|| ApiError::NotFound("Event not found".into()))?;
    Ok(Json(event))
}
