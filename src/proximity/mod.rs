//! Proximity index for refill stations.
//!
//! Provides great-circle distance, radius filtering, and distance ranking
//! over a borrowed snapshot of stations. Every function here is pure: inputs
//! are read, new outputs are allocated, nothing is shared or mutated.

pub mod distance;
pub mod filter;
pub mod rank;

pub use distance::{great_circle_distance, EARTH_RADIUS_M};
pub use filter::filter_within_radius;
pub use rank::{nearby, rank_by_distance, NearbyQuery};
