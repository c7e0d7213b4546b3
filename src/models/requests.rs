use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{GeoPoint, PointOfInterest};

/// Waypoint as sent by the route builder
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct WaypointInput {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
}

impl From<WaypointInput> for GeoPoint {
    fn from(input: WaypointInput) -> Self {
        GeoPoint::new(input.lat, input.lon)
    }
}

/// Request to filter caller-supplied points against a route
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FilterCorridorRequest {
    #[validate(length(min = 2), nested)]
    pub waypoints: Vec<WaypointInput>,
    #[validate(nested)]
    #[serde(default)]
    pub points: Vec<PointOfInterest>,
}

/// Request to filter a cached dataset against a route
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DatasetCorridorRequest {
    #[validate(length(min = 2), nested)]
    pub waypoints: Vec<WaypointInput>,
}

/// Request for leg distances and the geodesic polyline of a route
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RouteSummaryRequest {
    #[validate(length(min = 2), nested)]
    pub waypoints: Vec<WaypointInput>,
    #[validate(range(min = 1, max = 512))]
    #[serde(default = "default_segments_per_leg", alias = "segments_per_leg", rename = "segmentsPerLeg")]
    pub segments_per_leg: u16,
}

fn default_segments_per_leg() -> u16 {
    64
}

/// Convert validated inputs into engine waypoints
pub fn to_geo_points(waypoints: &[WaypointInput]) -> Vec<GeoPoint> {
    waypoints.iter().copied().map(GeoPoint::from).collect()
}
