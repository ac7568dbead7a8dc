//! Typed geographic point for the geospatially indexed collections.
//!
//! The wire and storage convention is GeoJSON: `coordinates` is always
//! `[longitude, latitude]`, longitude first. A transposed pair produces a
//! valid-looking but geographically wrong point, so the pair is never
//! handled as a bare tuple — both components are named fields and every
//! construction path validates them.

use serde::de;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum GeoError {
    #[error("location must be two comma-separated numbers: {0:?}")]
    Malformed(String),
    #[error("expected [longitude, latitude], got {0} value(s)")]
    WrongArity(usize),
    #[error("coordinates must be finite numbers")]
    NotFinite,
    #[error("longitude {longitude} / latitude {latitude} out of range")]
    OutOfRange { longitude: f64, latitude: f64 },
}

/// A validated geographic point. Invariant: both components are finite,
/// longitude within ±180 and latitude within ±90.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, GeoError> {
        if !longitude.is_finite() || !latitude.is_finite() {
            return Err(GeoError::NotFinite);
        }
        if !(-180.0..=180.0).contains(&longitude) || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::OutOfRange {
                longitude,
                latitude,
            });
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }

    /// Parse the form-field representation `"<longitude>, <latitude>"`.
    pub fn parse_form(value: &str) -> Result<Self, GeoError> {
        let parts: Vec<&str> = value.split(',').map(str::trim).collect();
        if parts.len() != 2 {
            return Err(GeoError::WrongArity(parts.len()));
        }
        let longitude: f64 = parts[0]
            .parse()
            .map_err(|_| GeoError::Malformed(value.to_string()))?;
        let latitude: f64 = parts[1]
            .parse()
            .map_err(|_| GeoError::Malformed(value.to_string()))?;
        Self::new(longitude, latitude)
    }
}

// Wire shape: {"type": "Point", "coordinates": [longitude, latitude]}
impl Serialize for GeoPoint {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("GeoPoint", 2)?;
        state.serialize_field("type", "Point")?;
        state.serialize_field("coordinates", &[self.longitude, self.latitude])?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for GeoPoint {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Wire {
            #[serde(rename = "type")]
            kind: String,
            coordinates: Vec<f64>,
        }

        let wire = Wire::deserialize(deserializer)?;
        if wire.kind != "Point" {
            return Err(de::Error::custom(format!(
                "unsupported geometry type {:?}",
                wire.kind
            )));
        }
        if wire.coordinates.len() != 2 {
            return Err(de::Error::custom(GeoError::WrongArity(
                wire.coordinates.len(),
            )));
        }
        GeoPoint::new(wire.coordinates[0], wire.coordinates[1]).map_err(de::Error::custom)
    }
}
