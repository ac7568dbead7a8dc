use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::*;

use super::column_parse_error;

pub fn insert_event(conn: &Connection, event: &Event) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO events (id, name, event_date, listed_by, longitude, latitude,
                             location_description, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            event.id.to_string(),
            event.name,
            event.event_date,
            event.listed_by.to_string(),
            event.location.longitude,
            event.location.latitude,
            event.location_description,
            event.created_at,
            event.updated_at,
        ],
    )?;
    Ok(())
}

const EVENT_VIEW_SQL: &str = "SELECT e.id, e.name, e.event_date, u.fullname,
                                     e.longitude, e.latitude, e.location_description
                              FROM events e
                              JOIN users u ON u.id = e.listed_by";

fn row_to_event_view(row: &Row) -> rusqlite::Result<EventView> {
    let location = GeoPoint::new(row.get(4)?, row.get(5)?)
        .map_err(|e| column_parse_error(4, DatabaseError::ConstraintViolation(e.to_string())))?;

    Ok(EventView {
        id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap_or_default(),
        name: row.get(1)?,
        event_date: row.get(2)?,
        listed_by: row.get(3)?,
        location,
        location_description: row.get(6)?,
    })
}

pub fn list_events(conn: &Connection) -> Result<Vec<EventView>, DatabaseError> {
    let mut stmt = conn.prepare(EVENT_VIEW_SQL)?;
    let rows = stmt.query_map([], row_to_event_view)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn list_events_by_owner(
    conn: &Connection,
    owner: &Uuid,
) -> Result<Vec<EventView>, DatabaseError> {
    let mut stmt = conn.prepare(&format!("{EVENT_VIEW_SQL} WHERE e.listed_by = ?1"))?;
    let rows = stmt.query_map(params![owner.to_string()], row_to_event_view)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn get_event(conn: &Connection, id: &Uuid) -> Result<Option<EventView>, DatabaseError> {
    let mut stmt = conn.prepare(&format!("{EVENT_VIEW_SQL} WHERE e.id = ?1"))?;
    let event = stmt
        .query_row(params![id.to_string()], row_to_event_view)
        .optional()?;
    Ok(event)
}
