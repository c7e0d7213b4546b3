//! Minimum great-circle distance from a point to a multi-leg route.
//!
//! Distances use the spherical cross-track formula for points whose
//! perpendicular foot lands inside a segment and fall back to the nearer
//! endpoint otherwise. The first and last legs with non-zero length
//! additionally reject points lying behind the origin or past the destination.

use crate::core::distance::{bearing_difference, haversine_distance, initial_bearing, EARTH_RADIUS_KM};
use crate::models::GeoPoint;

/// Segments (and endpoint offsets) shorter than this are treated as zero length
pub const SEGMENT_EPSILON_KM: f64 = 1e-3;

/// Distance from `point` to the great-circle segment `start`-`end`, in km
pub fn point_to_segment_distance(point: GeoPoint, start: GeoPoint, end: GeoPoint) -> f64 {
    let segment_length = haversine_distance(start, end);
    if segment_length < SEGMENT_EPSILON_KM {
        return haversine_distance(start, point);
    }

    let bearing_start_end = initial_bearing(start, end);
    let bearing_start_point = initial_bearing(start, point);

    // Projects before start
    if bearing_difference(bearing_start_end, bearing_start_point) > 90.0 {
        return haversine_distance(start, point);
    }

    // Projects beyond end
    if bearing_difference(initial_bearing(end, start), initial_bearing(end, point)) > 90.0 {
        return haversine_distance(end, point);
    }

    let d13 = haversine_distance(start, point) / EARTH_RADIUS_KM;
    let delta = (bearing_start_point - bearing_start_end).to_radians();
    let sin_xt = (d13.sin() * delta.sin()).clamp(-1.0, 1.0);

    (sin_xt.asin() * EARTH_RADIUS_KM).abs()
}

/// Minimum distance from `point` to the route through `path`, in km
///
/// Zero-length legs (repeated waypoints) are skipped; the origin cutoff applies
/// to the first leg with length and the destination cutoff to the last one.
/// Returns `f64::INFINITY` when every leg rejects the point, and for any input
/// that makes the trigonometry produce NaN. `path` must hold at least two
/// waypoints.
pub fn distance_from_path(point: GeoPoint, path: &[GeoPoint]) -> f64 {
    let has_length = |leg: &[GeoPoint]| haversine_distance(leg[0], leg[1]) >= SEGMENT_EPSILON_KM;

    let Some(first_leg) = path.windows(2).position(has_length) else {
        // Every waypoint coincides
        return path
            .first()
            .map(|&start| haversine_distance(start, point))
            .filter(|d| !d.is_nan())
            .unwrap_or(f64::INFINITY);
    };
    let last_leg = path.windows(2).rposition(has_length).unwrap_or(first_leg);

    path.windows(2)
        .enumerate()
        .filter(|&(i, leg)| {
            let (start, end) = (leg[0], leg[1]);
            has_length(leg)
                && !(i == first_leg && is_behind_origin(point, start, end))
                && !(i == last_leg && is_past_destination(point, start, end))
        })
        .map(|(_, leg)| point_to_segment_distance(point, leg[0], leg[1]))
        .map(|d| if d.is_nan() { f64::INFINITY } else { d })
        .fold(f64::INFINITY, f64::min)
}

/// The point lies behind the route's origin relative to the first leg
fn is_behind_origin(point: GeoPoint, start: GeoPoint, end: GeoPoint) -> bool {
    if haversine_distance(start, point) < SEGMENT_EPSILON_KM {
        return false;
    }
    bearing_difference(initial_bearing(start, end), initial_bearing(start, point)) > 90.0
}

/// The point lies ahead of the destination in the direction of the last leg
fn is_past_destination(point: GeoPoint, start: GeoPoint, end: GeoPoint) -> bool {
    if haversine_distance(end, point) < SEGMENT_EPSILON_KM {
        return false;
    }
    bearing_difference(initial_bearing(end, start), initial_bearing(end, point)) > 90.0
}
