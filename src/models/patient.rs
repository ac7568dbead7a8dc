use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role profile created at registration when role = patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub user_id: Uuid,
    pub preferred_language: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Patient profile joined to its owning User, projected for the
/// translation flow. No internal foreign keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientProfileView {
    pub fullname: String,
    pub email: String,
    pub preferred_language: String,
}
