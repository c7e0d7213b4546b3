use actix_web::{http::StatusCode, web, HttpResponse, Responder, ResponseError};
use std::sync::Arc;
use validator::Validate;

use crate::core::{great_circle_path, leg_summaries, route_distance_km, CorridorEngine};
use crate::models::{
    requests::to_geo_points, CorridorPointResponse, DatasetCorridorRequest, ErrorResponse,
    FilterCorridorRequest, FilterCorridorResponse, HealthResponse, PointOfInterest, ReloadResponse,
    Route, RouteSummaryRequest, RouteSummaryResponse, WaypointInput,
};
use crate::services::{JsonFileSource, PoiCache, PoiSource};

/// Application state shared across all handlers
pub struct AppState<S = JsonFileSource> {
    pub cache: Arc<PoiCache<S>>,
    pub engine: CorridorEngine,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            engine: self.engine.clone(),
        }
    }
}

/// Configure all corridor-related routes
pub fn configure<S: PoiSource>(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/corridor/filter", web::post().to(filter_corridor::<S>))
        .route("/corridor/datasets/{name}", web::post().to(filter_dataset::<S>))
        .route("/datasets/{name}/reload", web::post().to(reload_dataset::<S>))
        .route("/route/summary", web::post().to(route_summary));
}

fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> HttpResponse {
    ErrorResponse::new(status, error, message).error_response()
}

fn build_route(waypoints: &[WaypointInput]) -> Result<Route, HttpResponse> {
    Route::new(to_geo_points(waypoints))
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, "Invalid route", e.to_string()))
}

fn corridor_response(
    engine: &CorridorEngine,
    points: &[PointOfInterest],
    route: &Route,
) -> FilterCorridorResponse {
    let outcome = engine.run(points, route);

    FilterCorridorResponse {
        matches: outcome
            .matches
            .into_iter()
            .map(|m| CorridorPointResponse {
                point: m.point.clone(),
                distance_km: m.distance_km,
            })
            .collect(),
        total_candidates: outcome.total_candidates,
        prefiltered: outcome.prefiltered,
    }
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Filter caller-supplied points against a route
///
/// POST /api/v1/corridor/filter
///
/// Request body:
/// ```json
/// {
///   "waypoints": [{"lat": 40.6413, "lon": -73.7781}, {"lat": 33.9416, "lon": -118.4085}],
///   "points": [{"lat": 36.0544, "lon": -112.1401, "tier": 1, "name": "Grand Canyon"}]
/// }
/// ```
async fn filter_corridor<S: PoiSource>(
    state: web::Data<AppState<S>>,
    req: web::Json<FilterCorridorRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for corridor filter request: {}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let route = match build_route(&req.waypoints) {
        Ok(route) => route,
        Err(response) => return response,
    };

    let response = corridor_response(&state.engine, &req.points, &route);

    tracing::info!(
        "Corridor filter: {} of {} points retained ({} after prefilter) across {} legs",
        response.matches.len(),
        response.total_candidates,
        response.prefiltered,
        route.legs().count()
    );

    HttpResponse::Ok().json(response)
}

/// Filter a cached dataset against a route
///
/// POST /api/v1/corridor/datasets/{name}
async fn filter_dataset<S: PoiSource>(
    state: web::Data<AppState<S>>,
    name: web::Path<String>,
    req: web::Json<DatasetCorridorRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let route = match build_route(&req.waypoints) {
        Ok(route) => route,
        Err(response) => return response,
    };

    let points = match state.cache.get(&name).await {
        Ok(points) => points,
        Err(e) if e.is_not_found() => {
            return error_response(StatusCode::NOT_FOUND, "Dataset not found", e.to_string());
        }
        Err(e) => {
            tracing::error!("Failed to load dataset {}: {}", name, e);
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load dataset",
                e.to_string(),
            );
        }
    };

    let response = corridor_response(&state.engine, &points, &route);

    tracing::info!(
        "Dataset {}: {} of {} points retained",
        name,
        response.matches.len(),
        response.total_candidates
    );

    HttpResponse::Ok().json(response)
}

/// Reload a dataset from its source
///
/// POST /api/v1/datasets/{name}/reload
async fn reload_dataset<S: PoiSource>(
    state: web::Data<AppState<S>>,
    name: web::Path<String>,
) -> impl Responder {
    match state.cache.reload(&name).await {
        Ok(points) => {
            tracing::info!("Reloaded dataset {} ({} points)", name, points.len());
            HttpResponse::Ok().json(ReloadResponse {
                dataset: name.into_inner(),
                points: points.len(),
            })
        }
        Err(e) if e.is_not_found() => {
            error_response(StatusCode::NOT_FOUND, "Dataset not found", e.to_string())
        }
        Err(e) => {
            tracing::error!("Failed to reload dataset {}: {}", name, e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to reload dataset",
                e.to_string(),
            )
        }
    }
}

/// Leg distances, total distance and geodesic polyline of a route
///
/// POST /api/v1/route/summary
async fn route_summary(req: web::Json<RouteSummaryRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let route = match build_route(&req.waypoints) {
        Ok(route) => route,
        Err(response) => return response,
    };

    HttpResponse::Ok().json(RouteSummaryResponse {
        legs: leg_summaries(route.points()),
        total_distance_km: route_distance_km(route.points()),
        path: great_circle_path(route.points(), req.segments_per_leg as usize),
    })
}
