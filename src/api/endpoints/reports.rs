//! Incident-report endpoints.
//!
//! - `POST /api/report` — submit a geo-tagged report (session required)
//! - `GET /api/report` — public listing for NGO dashboards
//! - `GET /api/report/:id` — detail, with the reporter's NGO when one exists

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

    let (Some(title), Some(report_type_raw), Some(details), Some(location_raw)) = (
        form.get("title"),
        form.get("report_type"),
        form.get("details"),
        form.get("location"),
    ) else {
        return Err(ApiError::BadRequest("Missing required fields".into()));
    };

    let report_type: ReportType = report_type_raw
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid report type: {report_type_raw}")))?;
    let location = GeoPoint::parse_form(location_raw)?;

    let now = Utc::now();
    let report = Report {
        id: Uuid::new_v4(),
        title: title.into(),
        report_type,
        details: details.into(),
        reported_by: session.user_id,
        location,
        created_at: now,
        updated_at: now,
    };

    {
        let conn = ctx
            .db
            .lock()
            .map_err(|_| ApiError::Internal("db lock".into()))?;
        db::insert_report(&conn, &report)?;
    }

    Ok(Json(AckResponse::new("Report submitted successfully")))
}

pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<ReportView>>, ApiError> {
    let conn = ctx
        .db
        .lock()
        .map_err(|_| ApiError::Internal("db lock".into()))?;
    let reports = db::list_reports(&conn)?;
    Ok(Json(reports))
}

pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(report_id): Path<String>,
) -> Result<Json<ReportDetailView>, ApiError> {
    let id = Uuid::parse_str(&report_id)
        .map_err(|_| ApiError::BadRequest("Invalid report ID".into()))?;

    let conn = ctx
        .db
        .lock()
        .map_err(|_| ApiError::Internal("db lock".into()))?;
    let report = db::get_report(&conn, &id)?
        .ok_or_else(|| ApiError::NotFound("Report not found".into()))?;
    Ok(Json(report))
}
