use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use validator::{Validate, ValidationError};

/// Errors raised while building a route from user-selected waypoints
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RouteError {
    #[error("route needs at least 2 waypoints, got {count}")]
    TooFewWaypoints { count: usize },

    #[error("waypoint {index} has invalid coordinates ({lat}, {lon})")]
    InvalidCoordinate { index: usize, lat: f64, lon: f64 },
}

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Finite and inside [-90, 90] x [-180, 180]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// A stop on a route together with its position in the route
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteWaypoint {
    pub sequence: usize,
    #[serde(flatten)]
    pub location: GeoPoint,
}

/// Ordered multi-leg route: origin, optional stops, destination
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    waypoints: Vec<GeoPoint>,
}

impl Route {
    /// Validate and build a route.
    ///
    /// Coincident consecutive waypoints are accepted; corridor distances skip
    /// the resulting zero-length legs.
    pub fn new(waypoints: Vec<GeoPoint>) -> Result<Self, RouteError> {
        if waypoints.len() < 2 {
            return Err(RouteError::TooFewWaypoints {
                count: waypoints.len(),
            });
        }

        if let Some((index, point)) = waypoints.iter().enumerate().find(|(_, p)| !p.is_valid()) {
            return Err(RouteError::InvalidCoordinate {
                index,
                lat: point.lat,
                lon: point.lon,
            });
        }

        Ok(Self { waypoints })
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.waypoints
    }

    /// Consecutive (start, end) pairs
    pub fn legs(&self) -> impl Iterator<Item = (GeoPoint, GeoPoint)> + '_ {
        self.waypoints.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

/// Anything the corridor engine can place and rank
pub trait CorridorCandidate {
    fn location(&self) -> GeoPoint;
    fn tier(&self) -> u8;
}

/// Point of interest loaded by the data layer.
///
/// Display metadata other than `name` and `description` is carried through
/// untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PointOfInterest {
    #[validate(range(min = -90.0, max = 90.0), custom(function = "finite"))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0), custom(function = "finite"))]
    pub lon: f64,
    #[validate(range(min = 1))]
    pub tier: u8,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Range checks pass NaN, so coordinates are also required to be finite
fn finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("finite"))
    }
}

impl PointOfInterest {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64, tier: u8) -> Self {
        Self {
            lat,
            lon,
            tier,
            name: name.into(),
            description: None,
            extra: serde_json::Map::new(),
        }
    }
}

impl CorridorCandidate for PointOfInterest {
    #[inline]
    fn location(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }

    #[inline]
    fn tier(&self) -> u8 {
        self.tier
    }
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Maximum corridor radius per tier, in kilometers
#[derive(Debug, Clone, PartialEq)]
pub struct TierRadiusTable {
    radii_km: BTreeMap<u8, f64>,
}

impl TierRadiusTable {
    /// Build from a list where index `i` holds the radius of tier `i + 1`
    pub fn from_radii(radii_km: &[f64]) -> Self {
        let radii_km = radii_km
            .iter()
            .enumerate()
            .filter_map(|(i, &km)| u8::try_from(i + 1).ok().map(|tier| (tier, km)))
            .collect();
        Self { radii_km }
    }

    pub fn with_radius(mut self, tier: u8, radius_km: f64) -> Self {
        self.radii_km.insert(tier, radius_km);
        self
    }

    #[inline]
    pub fn radius_for(&self, tier: u8) -> Option<f64> {
        self.radii_km.get(&tier).copied()
    }

    /// Largest configured radius, 0 when the table is empty
    pub fn max_radius(&self) -> f64 {
        self.radii_km.values().copied().fold(0.0, f64::max)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, f64)> + '_ {
        self.radii_km.iter().map(|(&tier, &km)| (tier, km))
    }
}

impl Default for TierRadiusTable {
    fn default() -> Self {
        Self::from_radii(&[80.0, 30.0, 8.0])
    }
}

/// A retained candidate and its distance to the route
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorridorMatch<'a, T> {
    pub point: &'a T,
    pub distance_km: f64,
}

/// Distance and heading of one route leg
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegSummary {
    pub from: RouteWaypoint,
    pub to: RouteWaypoint,
    pub distance_km: f64,
    pub initial_bearing: f64,
}
