use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::*;

pub fn insert_ngo(conn: &Connection, ngo: &Ngo) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO ngos (id, contact_person_id, organization_name, area_of_focus,
                           created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            ngo.id.to_string(),
            ngo.contact_person_id.to_string(),
            ngo.organization_name,
            ngo.area_of_focus,
            ngo.created_at,
            ngo.updated_at,
        ],
    )?;
    Ok(())
}

pub fn get_ngo_by_contact(
    conn: &Connection,
    contact_person_id: &Uuid,
) -> Result<Option<Ngo>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, contact_person_id, organization_name, area_of_focus, created_at, updated_at
         FROM ngos WHERE contact_person_id = ?1",
    )?;
    let ngo = stmt
        .query_row(params![contact_person_id.to_string()], |row| {
            Ok(Ngo {
                id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap_or_default(),
                contact_person_id: Uuid::parse_str(&row.get::<_, String>(1)?).unwrap_or_default(),
                organization_name: row.get(2)?,
                area_of_focus: row.get(3)?,
                created_at: row.get::<_, DateTime<Utc>>(4)?,
                updated_at: row.get::<_, DateTime<Utc>>(5)?,
            })
        })
        .optional()?;
    Ok(ngo)
}
