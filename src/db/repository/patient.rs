use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::*;

pub fn insert_patient(conn: &Connection, patient: &Patient) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO patients (id, user_id, preferred_language, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            patient.id.to_string(),
            patient.user_id.to_string(),
            patient.preferred_language,
            patient.created_at,
            patient.updated_at,
        ],
    )?;
    Ok(())
}

pub fn get_patient_by_user(
    conn: &Connection,
    user_id: &Uuid,
) -> Result<Option<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, preferred_language, created_at, updated_at
         FROM patients WHERE user_id = ?1",
    )?;
    let patient = stmt
        .query_row(params![user_id.to_string()], |row| {
            Ok(Patient {
                id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap_or_default(),
                user_id: Uuid::parse_str(&row.get::<_, String>(1)?).unwrap_or_default(),
                preferred_language: row.get(2)?,
                created_at: row.get::<_, DateTime<Utc>>(3)?,
                updated_at: row.get::<_, DateTime<Utc>>(4)?,
            })
        })
        .optional()?;
    Ok(patient)
}

/// Patient profile joined to its owning user, projected for the
/// translation flow.
pub fn get_patient_profile(
    conn: &Connection,
    user_id: &Uuid,
) -> Result<Option<PatientProfileView>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT u.fullname, u.email, p.preferred_language
         FROM patients p
         JOIN users u ON u.id = p.user_id
         WHERE p.user_id = ?1",
    )?;
    let profile = stmt
        .query_row(params![user_id.to_string()], |row| {
            Ok(PatientProfileView {
                fullname: row.get(0)?,
                email: row.get(1)?,
                preferred_language: row.get(2)?,
            })
        })
        .optional()?;
    Ok(profile)
}
