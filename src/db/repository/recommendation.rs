use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::*;

pub fn insert_recommendation(
    conn: &Connection,
    recommendation: &HealthRecommendation,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO health_recommendations (id, content, recommendation_for,
                                             created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            recommendation.id.to_string(),
            recommendation.content,
            recommendation.recommendation_for.to_string(),
            recommendation.created_at,
            recommendation.updated_at,
        ],
    )?;
    Ok(())
}

pub fn list_recommendations_for_user(
    conn: &Connection,
    user_id: &Uuid,
) -> Result<Vec<HealthRecommendation>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, content, recommendation_for, created_at, updated_at
         FROM health_recommendations WHERE recommendation_for = ?1",
    )?;

    let rows = stmt.query_map(params![user_id.to_string()], |row| {
        Ok(HealthRecommendation {
            id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap_or_default(),
            content: row.get(1)?,
            recommendation_for: Uuid::parse_str(&row.get::<_, String>(2)?).unwrap_or_default(),
            created_at: row.get::<_, DateTime<Utc>>(3)?,
            updated_at: row.get::<_, DateTime<Utc>>(4)?,
        })
    })?;

    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}
