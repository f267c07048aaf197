use crate::error::{Result, SabaiError};
use crate::types::{LocatedPoint, StationRecord};

use super::distance::great_circle_distance;

/// Reject negative or NaN radii.
pub(crate) fn validate_radius(radius_m: f64) -> Result<()> {
    if radius_m.is_nan() || radius_m < 0.0 {
        return Err(SabaiError::InvalidArgument(format!(
            "radius must be non-negative, got {radius_m}"
        )));
    }
    Ok(())
}

/// Whether `point` lies within `radius_m` of `center`. The bound is inclusive.
#[inline]
pub fn is_within_radius(point: LocatedPoint, center: LocatedPoint, radius_m: f64) -> bool {
    great_circle_distance(point, center) <= radius_m
}

/// Keep the stations whose distance to `center` is at most `radius_m`,
/// preserving their input order.
pub fn filter_within_radius(
    records: &[StationRecord],
    center: LocatedPoint,
    radius_m: f64,
) -> Result<Vec<StationRecord>> {
    validate_radius(radius_m)?;
    center.validate()?;

    let mut kept = Vec::new();
    for record in records {
        record.location.validate()?;
        if is_within_radius(record.location, center, radius_m) {
            kept.push(record.clone());
        }
    }
    Ok(kept)
}
