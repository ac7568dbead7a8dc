use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::*;

pub fn insert_provider(
    conn: &Connection,
    provider: &HealthcareProvider,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO healthcare_providers (id, user_id, license_id, specialization,
                associated_organization, years_of_experience, preferred_language,
                booking_link, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            provider.id.to_string(),
            provider.user_id.to_string(),
            provider.license_id,
            provider.specialization,
            provider.associated_organization,
            provider.years_of_experience,
            provider.preferred_language,
            provider.booking_link,
            provider.created_at,
            provider.updated_at,
        ],
    )?;
    Ok(())
}

pub fn get_provider_by_user(
    conn: &Connection,
    user_id: &Uuid,
) -> Result<Option<HealthcareProvider>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, license_id, specialization, associated_organization,
                years_of_experience, preferred_language, booking_link, created_at, updated_at
         FROM healthcare_providers WHERE user_id = ?1",
    )?;
    let provider = stmt
        .query_row(params![user_id.to_string()], |row| {
            Ok(HealthcareProvider {
                id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap_or_default(),
                user_id: Uuid::parse_str(&row.get::<_, String>(1)?).unwrap_or_default(),
                license_id: row.get(2)?,
                specialization: row.get(3)?,
                associated_organization: row.get(4)?,
                years_of_experience: row.get(5)?,
                preferred_language: row.get(6)?,
                booking_link: row.get(7)?,
                created_at: row.get::<_, DateTime<Utc>>(8)?,
                updated_at: row.get::<_, DateTime<Utc>>(9)?,
            })
        })
        .optional()?;
    Ok(provider)
}

/// Provider directory: every profile joined to its owning user. The
/// projected `id` is the user id; the license id stays internal.
pub fn list_providers(conn: &Connection) -> Result<Vec<ProviderView>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT u.id, u.fullname, u.email, u.phone, h.specialization,
                h.associated_organization, h.years_of_experience, h.booking_link
         FROM healthcare_providers h
         JOIN users u ON u.id = h.user_id",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(ProviderView {
            id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap_or_default(),
            fullname: row.get(1)?,
            email: row.get(2)?,
            phone: row.get(3)?,
            specialization: row.get(4)?,
            associated_organization: row.get(5)?,
            years_of_experience: row.get(6)?,
            booking_link: row.get(7)?,
        })
    })?;

    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Atomic single-document update of the booking link, scoped to the
/// owning user. Returns `false` when no provider profile exists.
pub fn update_booking_link(
    conn: &Connection,
    user_id: &Uuid,
    booking_link: &str,
) -> Result<bool, DatabaseError> {
    let changed = conn.execute(
        "UPDATE healthcare_providers
         SET booking_link = ?1, updated_at = ?2
         WHERE user_id = ?3",
        params![booking_link, Utc::now(), user_id.to_string()],
    )?;
    Ok(changed > 0)
}
