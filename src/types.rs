use serde::{Deserialize, Serialize};

use crate::error::{Result, SabaiError};

/// A unique identifier for a station.
pub type StationId = String;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocatedPoint {
    pub lat: f64,
    pub lng: f64,
}

impl LocatedPoint {
    /// Build a point, rejecting coordinates outside [-90, 90] / [-180, 180].
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        let point = Self { lat, lng };
        point.validate()?;
        Ok(point)
    }

    /// Check the coordinate ranges. NaN is never in range.
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(SabaiError::InvalidArgument(format!(
                "latitude {} outside [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(SabaiError::InvalidArgument(format!(
                "longitude {} outside [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for LocatedPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// A refill station as persisted in the local fallback store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub id: StationId,
    pub name: String,
    #[serde(flatten)]
    pub location: LocatedPoint,
    /// Price per litre.
    pub price: f64,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Photo URLs or `data:` URLs, in submission order.
    #[serde(default)]
    pub photos: Vec<String>,
}

impl StationRecord {
    /// Check the coordinate ranges and that the price is a non-negative number.
    pub fn validate(&self) -> Result<()> {
        self.location.validate()?;
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(SabaiError::InvalidArgument(format!(
                "station {}: price must be non-negative, got {}",
                self.id, self.price
            )));
        }
        Ok(())
    }
}

/// A station annotated with its distance from a reference point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedStation {
    pub station: StationRecord,
    pub distance_m: f64,
}
