use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::*;

pub fn insert_prescription(
    conn: &Connection,
    prescription: &Prescription,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO prescriptions (id, image_url, content, prescription_of,
                                    created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            prescription.id.to_string(),
            prescription.image_url,
            prescription.content,
            prescription.prescription_of.to_string(),
            prescription.created_at,
            prescription.updated_at,
        ],
    )?;
    Ok(())
}

pub fn list_prescriptions_for_user(
    conn: &Connection,
    user_id: &Uuid,
) -> Result<Vec<Prescription>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, image_url, content, prescription_of, created_at, updated_at
         FROM prescriptions WHERE prescription_of = ?1",
    )?;

    let rows = stmt.query_map(params![user_id.to_string()], |row| {
        Ok(Prescription {
            id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap_or_default(),
            image_url: row.get(1)?,
            content: row.get(2)?,
            prescription_of: Uuid::parse_str(&row.get::<_, String>(3)?).unwrap_or_default(),
            created_at: row.get::<_, DateTime<Utc>>(4)?,
            updated_at: row.get::<_, DateTime<Utc>>(5)?,
        })
    })?;

    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}
