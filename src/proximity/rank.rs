use serde::{Deserialize, Serialize};

use crate::error::{Result, SabaiError};
use crate::types::{LocatedPoint, RankedStation, StationRecord};

use super::distance::great_circle_distance;
use super::filter::filter_within_radius;

/// Pair every station with its distance to `origin`, nearest first.
///
/// The sort is stable: stations at equal distance keep their input order,
/// which is what decides list order for equidistant stations.
pub fn rank_by_distance(
    records: &[StationRecord],
    origin: LocatedPoint,
) -> Result<Vec<RankedStation>> {
    origin.validate()?;

    let mut ranked = Vec::with_capacity(records.len());
    for record in records {
        record.location.validate()?;
        ranked.push(RankedStation {
            distance_m: great_circle_distance(origin, record.location),
            station: record.clone(),
        });
    }

    ranked.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
    Ok(ranked)
}

/// A radius query around `center`, optionally ranked from a different origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearbyQuery {
    pub center: LocatedPoint,
    pub radius_m: f64,
    /// Where distances are measured from. Defaults to `center`.
    #[serde(default)]
    pub origin: Option<LocatedPoint>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl NearbyQuery {
    pub fn new(center: LocatedPoint, radius_m: f64) -> Self {
        Self {
            center,
            radius_m,
            origin: None,
            limit: None,
        }
    }

    pub fn with_origin(mut self, origin: LocatedPoint) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Filter by radius around the query center, then rank by distance from the
/// query origin, then truncate to the limit.
pub fn nearby(records: &[StationRecord], query: &NearbyQuery) -> Result<Vec<RankedStation>> {
    if query.limit == Some(0) {
        return Err(SabaiError::InvalidArgument("limit must be > 0".into()));
    }

    let within = filter_within_radius(records, query.center, query.radius_m)?;
    let mut ranked = rank_by_distance(&within, query.origin.unwrap_or(query.center))?;
    if let Some(limit) = query.limit {
        ranked.truncate(limit);
    }
    Ok(ranked)
}
