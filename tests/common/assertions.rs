use sabai::error::SabaiError;
use sabai::types::{RankedStation, StationRecord};

/// Collect station ids in order.
pub fn ids(stations: &[StationRecord]) -> Vec<&str> {
    stations.iter().map(|s| s.id.as_str()).collect()
}

/// Collect ranked station ids in order.
pub fn ranked_ids(ranked: &[RankedStation]) -> Vec<&str> {
    ranked.iter().map(|r| r.station.id.as_str()).collect()
}

/// Assert that distances never decrease down the list.
pub fn assert_sorted_by_distance(ranked: &[RankedStation]) {
    for pair in ranked.windows(2) {
        assert!(
            pair[0].distance_m <= pair[1].distance_m,
            "ranking out of order: {} ({}) before {} ({})",
            pair[0].station.id,
            pair[0].distance_m,
            pair[1].station.id,
            pair[1].distance_m
        );
    }
}

/// Assert that an operation failed with InvalidArgument.
pub fn assert_invalid_argument<T: std::fmt::Debug>(result: &Result<T, SabaiError>) {
    match result {
        Err(SabaiError::InvalidArgument(_)) => {}
        other => panic!("expected InvalidArgument error, got: {other:?}"),
    }
}

/// Assert that an operation failed with NotFound.
pub fn assert_not_found<T: std::fmt::Debug>(result: &Result<T, SabaiError>) {
    match result {
        Err(SabaiError::NotFound { .. }) => {}
        other => panic!("expected NotFound error, got: {other:?}"),
    }
}
