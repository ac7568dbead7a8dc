use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A prescription image persisted together with the AI analysis of it.
/// `content` is the analysis as opaque JSON text; `image_url` is the
/// durable object-storage URL, stored verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    pub id: Uuid,
    pub image_url: String,
    pub content: String,
    pub prescription_of: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
