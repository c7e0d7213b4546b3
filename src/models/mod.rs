// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BoundingBox, CorridorCandidate, CorridorMatch, GeoPoint, LegSummary, PointOfInterest, Route,
    RouteError, RouteWaypoint, TierRadiusTable,
};
pub use requests::{DatasetCorridorRequest, FilterCorridorRequest, RouteSummaryRequest, WaypointInput};
pub use responses::{
    CorridorPointResponse, ErrorResponse, FilterCorridorResponse, HealthResponse, ReloadResponse,
    RouteSummaryResponse,
};
