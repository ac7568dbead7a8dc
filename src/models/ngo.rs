use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role profile created at registration when role = ngo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ngo {
    pub id: Uuid,
    pub contact_person_id: Uuid,
    pub organization_name: String,
    pub area_of_focus: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
