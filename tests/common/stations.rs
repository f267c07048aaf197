use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sabai::types::{LocatedPoint, StationRecord};

/// Chiang Mai old city, the default map center.
pub const OLD_CITY: LocatedPoint = LocatedPoint {
    lat: 18.7875,
    lng: 98.993333,
};

/// A station with default price and no rating, note, or photos.
pub fn station(id: &str, lat: f64, lng: f64) -> StationRecord {
    StationRecord {
        id: id.to_string(),
        name: format!("Station {id}"),
        location: LocatedPoint { lat, lng },
        price: 0.5,
        rating: None,
        note: None,
        photos: Vec::new(),
    }
}

/// Generate `n` stations scattered uniformly within `spread_deg` of `center`.
pub fn scattered_stations(n: usize, center: LocatedPoint, spread_deg: f64) -> Vec<StationRecord> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n)
        .map(|i| {
            let lat = (center.lat + rng.gen_range(-spread_deg..spread_deg)).clamp(-90.0, 90.0);
            let lng = (center.lng + rng.gen_range(-spread_deg..spread_deg)).clamp(-180.0, 180.0);
            let mut st = station(&format!("st_{i}"), lat, lng);
            st.price = rng.gen_range(0.25..2.0);
            st
        })
        .collect()
}

/// Point `meters` due north of `from`, on the same sphere the index uses.
pub fn north_of(from: LocatedPoint, meters: f64) -> LocatedPoint {
    let dlat = (meters / sabai::proximity::EARTH_RADIUS_M).to_degrees();
    LocatedPoint {
        lat: from.lat + dlat,
        lng: from.lng,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scattered_stations() {
        let stations = scattered_stations(10, OLD_CITY, 0.05);
        assert_eq!(stations.len(), 10);
        assert_eq!(stations[0].id, "st_0");
        assert!(stations.iter().all(|s| s.location.validate().is_ok()));
    }
}
