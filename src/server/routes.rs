use std::time::Duration;

use axum::extract::{DefaultBodyLimit, MatchedPath, Request};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::handlers::{health, metrics, nearby, stations};
use super::AppState;

pub fn build_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);
    let max_body = state.config.server.max_body_bytes;

    Router::new()
        .route("/healthz", get(health::health_check))
        .route("/metrics", get(metrics::metrics_handler))
        .route(
            "/v1/stations",
            get(stations::list_stations).post(stations::create_station),
        )
        .route("/v1/stations/nearby", get(nearby::nearby_stations))
        .route(
            "/v1/stations/:id",
            get(stations::get_station).delete(stations::delete_station),
        )
        .route("/v1/stations/:id/route", get(stations::station_route))
        .route_layer(middleware::from_fn(track_requests))
        .layer(DefaultBodyLimit::max(max_body))
        .layer(RequestBodyLimitLayer::new(max_body))
        .layer(TimeoutLayer::new(timeout))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Count requests by method, matched route, and status.
async fn track_requests(req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(req).await;
    crate::metrics::HTTP_REQUESTS_TOTAL
        .with_label_values(&[&method, &path, response.status().as_str()])
        .inc();
    response
}
