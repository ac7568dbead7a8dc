use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::ReportType;
use super::geo::GeoPoint;

/// Geo-tagged incident report submitted by a patient, read by NGOs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: Uuid,
    pub title: String,
    pub report_type: ReportType,
    pub details: String,
    pub reported_by: Uuid,
    pub location: GeoPoint,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Report joined to its owning User for list views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportView {
    pub id: Uuid,
    pub title: String,
    pub report_type: ReportType,
    pub details: String,
    pub reported_by: String,
    pub location: GeoPoint,
}

/// Detail view: additionally carries the creation timestamp and, when the
/// reporter is an NGO's contact person, that NGO's display name. The NGO
/// join is optional — a report from a plain patient is still surfaced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDetailView {
    pub id: Uuid,
    pub title: String,
    pub report_type: ReportType,
    pub details: String,
    pub reported_by: String,
    pub location: GeoPoint,
    pub created_at: DateTime<Utc>,
    pub ngo_name: Option<String>,
}
