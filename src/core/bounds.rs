use crate::models::{BoundingBox, GeoPoint};

/// Approximate length of one degree of latitude
pub const KM_PER_DEGREE: f64 = 111.0;

/// Floor for cos(latitude) so the longitude buffer stays finite at the poles
const MIN_COS_LATITUDE: f64 = 1e-6;

/// Calculate a bounding box around a route
///
/// This is much faster than per-segment spherical math for pre-filtering.
/// 1° latitude ≈ 111km, 1° longitude ≈ 111km * cos(latitude), evaluated at the
/// middle of the route's latitude extent.
///
/// Longitudes are not unwrapped, so a route crossing the antimeridian gets a
/// box spanning the long way round.
///
/// # Arguments
/// * `waypoints` - Route waypoints; callers guarantee at least one
/// * `buffer_km` - Distance to expand the box by on every side
pub fn create_bounding_box(waypoints: &[GeoPoint], buffer_km: f64) -> BoundingBox {
    let mut min_lat = f64::INFINITY;
    let mut max_lat = f64::NEG_INFINITY;
    let mut min_lon = f64::INFINITY;
    let mut max_lon = f64::NEG_INFINITY;

    for point in waypoints {
        min_lat = min_lat.min(point.lat);
        max_lat = max_lat.max(point.lat);
        min_lon = min_lon.min(point.lon);
        max_lon = max_lon.max(point.lon);
    }

    let lat_buffer = buffer_km / KM_PER_DEGREE;

    let mean_lat = (min_lat + max_lat) / 2.0;
    let cos_lat = mean_lat.to_radians().cos().abs().max(MIN_COS_LATITUDE);
    let lon_buffer = lat_buffer / cos_lat;

    BoundingBox {
        min_lat: min_lat - lat_buffer,
        max_lat: max_lat + lat_buffer,
        min_lon: min_lon - lon_buffer,
        max_lon: max_lon + lon_buffer,
    }
}

/// Check if a point is within a bounding box (inclusive on every edge)
#[inline]
pub fn is_within_bounding_box(point: GeoPoint, bbox: &BoundingBox) -> bool {
    point.lat >= bbox.min_lat
        && point.lat <= bbox.max_lat
        && point.lon >= bbox.min_lon
        && point.lon <= bbox.max_lon
}
