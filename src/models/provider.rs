use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role profile created at registration when role = healthcare_provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthcareProvider {
    pub id: Uuid,
    pub user_id: Uuid,
    pub license_id: String,
    pub specialization: String,
    pub associated_organization: String,
    pub years_of_experience: u32,
    pub preferred_language: String,
    pub booking_link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Provider directory entry: profile joined to its owning User. The `id`
/// is the owning user's id, matching the consultation-booking client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderView {
    pub id: Uuid,
    pub fullname: String,
    pub email: String,
    pub phone: String,
    pub specialization: String,
    pub associated_organization: String,
    pub years_of_experience: u32,
    pub booking_link: String,
}
