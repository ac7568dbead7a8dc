use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// AI-generated lifestyle coaching plan, stored as opaque JSON text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthRecommendation {
    pub id: Uuid,
    pub content: String,
    pub recommendation_for: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
