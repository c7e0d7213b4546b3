//! Flight Corridor - points of interest along great-circle flight routes
//!
//! This library filters points of interest down to those lying within a
//! tiered proximity band of a multi-leg route. It implements a two-stage
//! pipeline: a bounding-box prefilter followed by spherical cross-track
//! distance with origin/destination cutoffs.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{create_bounding_box, distance_from_path, filter_in_corridor, haversine_distance, CorridorEngine};
pub use models::{GeoPoint, PointOfInterest, Route, TierRadiusTable};
