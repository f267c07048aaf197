use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::error::SabaiError;
use crate::route::directions_url;
use crate::server::AppState;
use crate::source::StationSource;
use crate::submission::{submit_station, Submission, SubmissionOutcome};
use crate::types::{LocatedPoint, StationRecord};

use super::{ApiError, ApiJson, ApiQuery};

pub async fn list_stations(
    State(state): State<AppState>,
) -> Result<Json<Vec<StationRecord>>, ApiError> {
    let stations = state.store.snapshot().await.map_err(ApiError::from)?;
    Ok(Json(stations))
}

pub async fn get_station(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StationRecord>, ApiError> {
    let station = state.store.get(&id).await.map_err(ApiError::from)?;
    Ok(Json(station))
}

pub async fn delete_station(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let removed = state.store.remove(&id).await.map_err(ApiError::from)?;
    if !removed {
        return Err(ApiError(SabaiError::NotFound { id }));
    }
    info!(id = %id, "station removed");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, req), fields(name = %req.name))]
pub async fn create_station(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<Submission>,
) -> Result<(StatusCode, Json<SubmissionOutcome>), ApiError> {
    let attempted = if state.ingest.is_some() { "remote" } else { "local" };

    let result = submit_station(req, state.ingest.as_deref(), &state.store).await;
    let status_label = if result.is_ok() { "ok" } else { "error" };
    crate::metrics::SUBMISSIONS_TOTAL
        .with_label_values(&[attempted, status_label])
        .inc();

    let outcome = result.map_err(ApiError::from)?;
    let status = match outcome {
        SubmissionOutcome::Ingested { .. } => StatusCode::ACCEPTED,
        SubmissionOutcome::SavedLocally { .. } => StatusCode::CREATED,
    };
    Ok((status, Json(outcome)))
}

#[derive(Debug, Deserialize)]
pub struct RouteParams {
    pub origin_lat: Option<f64>,
    pub origin_lng: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub url: String,
}

pub async fn station_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(params): ApiQuery<RouteParams>,
) -> Result<Json<RouteResponse>, ApiError> {
    let (lat, lng) = match (params.origin_lat, params.origin_lng) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => {
            return Err(ApiError(SabaiError::Validation(
                "origin_lat and origin_lng are required to route from your location".into(),
            )))
        }
    };
    let origin = LocatedPoint::new(lat, lng).map_err(ApiError::from)?;

    let station = state.store.get(&id).await.map_err(ApiError::from)?;
    let url = directions_url(
        &state.config.map.directions_base_url,
        origin,
        station.location,
    )
    .map_err(ApiError::from)?;

    Ok(Json(RouteResponse {
        url: url.to_string(),
    }))
}
