use serde::{Deserialize, Serialize};
use crate::models::domain::{GeoPoint, LegSummary, PointOfInterest};

/// A point retained in the corridor with its distance to the route
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorridorPointResponse {
    pub point: PointOfInterest,
    pub distance_km: f64,
}

/// Response for corridor filter endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCorridorResponse {
    pub matches: Vec<CorridorPointResponse>,
    pub total_candidates: usize,
    pub prefiltered: usize,
}

/// Response for the route summary endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummaryResponse {
    pub legs: Vec<LegSummary>,
    pub total_distance_km: f64,
    pub path: Vec<GeoPoint>,
}

/// Dataset reload response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReloadResponse {
    pub dataset: String,
    pub points: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
