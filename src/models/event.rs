use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::geo::GeoPoint;

/// Community health event listed by an NGO or provider. Immutable after
/// creation — no update/delete surface exists.
///
/// `event_date` is a display string, not a validated date type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub event_date: String,
    pub listed_by: Uuid,
    pub location: GeoPoint,
    pub location_description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Event joined to its owning User: `listed_by` carries the creator's
/// display name, never their identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventView {
    pub id: Uuid,
    pub name: String,
    pub event_date: String,
    pub listed_by: String,
    pub location: GeoPoint,
    pub location_description: String,
}
