use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::SabaiError;
use crate::proximity::{self, NearbyQuery};
use crate::server::AppState;
use crate::source::StationSource;
use crate::types::{LocatedPoint, RankedStation};

use super::{ApiError, ApiQuery};

/// Query string for `/v1/stations/nearby`. Center and radius fall back to the
/// configured map defaults.
#[derive(Debug, Deserialize)]
pub struct NearbyParams {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius_m: Option<f64>,
    pub origin_lat: Option<f64>,
    pub origin_lng: Option<f64>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct NearbyResponse {
    pub center: LocatedPoint,
    pub radius_m: f64,
    pub origin: LocatedPoint,
    pub results: Vec<RankedStation>,
}

fn point_param(
    lat: Option<f64>,
    lng: Option<f64>,
    what: &str,
) -> Result<Option<LocatedPoint>, SabaiError> {
    match (lat, lng) {
        (Some(lat), Some(lng)) => LocatedPoint::new(lat, lng).map(Some),
        (None, None) => Ok(None),
        _ => Err(SabaiError::Validation(format!(
            "{what} needs both latitude and longitude"
        ))),
    }
}

#[instrument(skip(state, params))]
pub async fn nearby_stations(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<NearbyParams>,
) -> Result<Json<NearbyResponse>, ApiError> {
    let start = std::time::Instant::now();
    crate::metrics::NEARBY_QUERIES_TOTAL.inc();

    let map = &state.config.map;
    let center = point_param(params.lat, params.lng, "center")?.unwrap_or(LocatedPoint {
        lat: map.center_lat,
        lng: map.center_lng,
    });
    let origin = point_param(params.origin_lat, params.origin_lng, "origin")?.unwrap_or(center);
    let radius_m = params.radius_m.unwrap_or(map.radius_m);

    let limit = params.limit.unwrap_or(map.max_results);
    if limit > map.max_results {
        return Err(ApiError(SabaiError::Validation(format!(
            "limit {} exceeds maximum of {}",
            limit, map.max_results
        ))));
    }

    let stations = state.store.snapshot().await.map_err(ApiError::from)?;
    let query = NearbyQuery::new(center, radius_m)
        .with_origin(origin)
        .with_limit(limit);
    let results = proximity::nearby(&stations, &query).map_err(ApiError::from)?;

    let elapsed = start.elapsed();
    crate::metrics::NEARBY_DURATION.observe(elapsed.as_secs_f64());

    info!(
        total = stations.len(),
        results = results.len(),
        radius_m,
        elapsed_ms = elapsed.as_millis(),
        "nearby query complete"
    );

    Ok(Json(NearbyResponse {
        center,
        radius_m,
        origin,
        results,
    }))
}
