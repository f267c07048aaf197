use crate::types::LocatedPoint;

/// Mean Earth radius in meters. No ellipsoidal correction is applied.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in meters between two points (haversine).
///
/// Both points are expected to be in range; callers validate.
#[inline]
pub fn great_circle_distance(a: LocatedPoint, b: LocatedPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let half_dlat = ((b.lat - a.lat).to_radians() / 2.0).sin();
    let half_dlng = ((b.lng - a.lng).to_radians() / 2.0).sin();

    let h = half_dlat * half_dlat + lat1.cos() * lat2.cos() * half_dlng * half_dlng;
    // Rounding can push h just past 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}
