use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::*;

use super::column_parse_error;

pub fn insert_report(conn: &Connection, report: &Report) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO reports (id, title, report_type, details, reported_by,
                              longitude, latitude, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            report.id.to_string(),
            report.title,
            report.report_type.as_str(),
            report.details,
            report.reported_by.to_string(),
            report.location.longitude,
            report.location.latitude,
            report.created_at,
            report.updated_at,
        ],
    )?;
    Ok(())
}

fn report_type_at(row: &Row, idx: usize) -> rusqlite::Result<ReportType> {
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e: DatabaseError| column_parse_error(idx, e))
}

fn location_at(row: &Row, idx: usize) -> rusqlite::Result<GeoPoint> {
    GeoPoint::new(row.get(idx)?, row.get(idx + 1)?)
        .map_err(|e| column_parse_error(idx, DatabaseError::ConstraintViolation(e.to_string())))
}

pub fn list_reports(conn: &Connection) -> Result<Vec<ReportView>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT r.id, r.title, r.report_type, r.details, u.fullname, r.longitude, r.latitude
         FROM reports r
         JOIN users u ON u.id = r.reported_by",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(ReportView {
            id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap_or_default(),
            title: row.get(1)?,
            report_type: report_type_at(row, 2)?,
            details: row.get(3)?,
            reported_by: row.get(4)?,
            location: location_at(row, 5)?,
        })
    })?;

    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Detail fetch. The NGO side of the join is optional by design: a report
/// from a reporter who is no NGO's contact person is surfaced with
/// `ngo_name: None` rather than dropped.
pub fn get_report(conn: &Connection, id: &Uuid) -> Result<Option<ReportDetailView>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT r.id, r.title, r.report_type, r.details, u.fullname,
                r.longitude, r.latitude, r.created_at, n.organization_name
         FROM reports r
         JOIN users u ON u.id = r.reported_by
         LEFT JOIN ngos n ON n.contact_person_id = r.reported_by
         WHERE r.id = ?1",
    )?;

    let report = stmt
        .query_row(params![id.to_string()], |row| {
            Ok(ReportDetailView {
                id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap_or_default(),
                title: row.get(1)?,
                report_type: report_type_at(row, 2)?,
                details: row.get(3)?,
                reported_by: row.get(4)?,
                location: location_at(row, 5)?,
                created_at: row.get::<_, DateTime<Utc>>(7)?,
                ngo_name: row.get(8)?,
            })
        })
        .optional()?;
    Ok(report)
}
