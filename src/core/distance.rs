use crate::models::{GeoPoint, LegSummary, RouteWaypoint};

/// Earth's radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate the Haversine distance between two points in kilometers
///
/// # Arguments
/// * `from` - First point, degrees
/// * `to` - Second point, degrees
///
/// # Returns
/// Distance in kilometers
#[inline]
pub fn haversine_distance(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lon = (to.lon - from.lon).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Initial great-circle bearing from `from` towards `to`
///
/// # Returns
/// Bearing in degrees, clockwise from north, in [0, 360)
#[inline]
pub fn initial_bearing(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lon = (to.lon - from.lon).to_radians();

    let y = delta_lon.sin() * lat2_rad.cos();
    let x = lat1_rad.cos() * lat2_rad.sin() - lat1_rad.sin() * lat2_rad.cos() * delta_lon.cos();

    y.atan2(x).to_degrees().rem_euclid(360.0)
}

/// Smallest absolute angle between two bearings, in [0, 180]
#[inline]
pub fn bearing_difference(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(360.0);
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// Point reached by travelling `distance_km` from `from` on initial `bearing` degrees
pub fn destination_point(from: GeoPoint, bearing: f64, distance_km: f64) -> GeoPoint {
    let lat1 = from.lat.to_radians();
    let lon1 = from.lon.to_radians();
    let theta = bearing.to_radians();
    let delta = distance_km / EARTH_RADIUS_KM;

    let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos())
        .clamp(-1.0, 1.0)
        .asin();
    let lon2 = lon1
        + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());

    // Normalise longitude to [-180, 180)
    GeoPoint::new(lat2.to_degrees(), (lon2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0)
}

/// Point at `fraction` of the way along the great circle from `from` to `to`
///
/// `fraction` is clamped to [0, 1]; the ends return `from` and `to` exactly.
/// Coincident and antipodal inputs have no unique great circle; `from` is
/// returned for both.
pub fn intermediate_point(from: GeoPoint, to: GeoPoint, fraction: f64) -> GeoPoint {
    if fraction.is_nan() || fraction <= 0.0 {
        return from;
    }
    if fraction >= 1.0 {
        return to;
    }
    let delta = haversine_distance(from, to) / EARTH_RADIUS_KM;
    let sin_delta = delta.sin();

    if sin_delta.abs() < 1e-12 {
        return from;
    }

    let (lat1, lon1) = (from.lat.to_radians(), from.lon.to_radians());
    let (lat2, lon2) = (to.lat.to_radians(), to.lon.to_radians());

    let a = ((1.0 - fraction) * delta).sin() / sin_delta;
    let b = (fraction * delta).sin() / sin_delta;

    let x = a * lat1.cos() * lon1.cos() + b * lat2.cos() * lon2.cos();
    let y = a * lat1.cos() * lon1.sin() + b * lat2.cos() * lon2.sin();
    let z = a * lat1.sin() + b * lat2.sin();

    GeoPoint::new(
        z.atan2((x * x + y * y).sqrt()).to_degrees(),
        y.atan2(x).to_degrees(),
    )
}

/// Densify a route into a geodesic polyline for drawing
///
/// Each leg is split into `segments_per_leg` pieces; junction waypoints are
/// emitted once.
pub fn great_circle_path(waypoints: &[GeoPoint], segments_per_leg: usize) -> Vec<GeoPoint> {
    let segments = segments_per_leg.max(1);
    let Some(&last) = waypoints.last() else {
        return Vec::new();
    };

    let mut path = Vec::with_capacity(waypoints.len().saturating_sub(1) * segments + 1);
    for leg in waypoints.windows(2) {
        path.extend(
            (0..segments).map(|i| intermediate_point(leg[0], leg[1], i as f64 / segments as f64)),
        );
    }
    path.push(last);
    path
}

/// Total great-circle length of a route in kilometers
pub fn route_distance_km(waypoints: &[GeoPoint]) -> f64 {
    waypoints
        .windows(2)
        .map(|leg| haversine_distance(leg[0], leg[1]))
        .sum()
}

/// Per-leg distance and initial bearing, with each end labelled by its
/// position in the route
pub fn leg_summaries(waypoints: &[GeoPoint]) -> Vec<LegSummary> {
    waypoints
        .windows(2)
        .enumerate()
        .map(|(sequence, leg)| LegSummary {
            from: RouteWaypoint {
                sequence,
                location: leg[0],
            },
            to: RouteWaypoint {
                sequence: sequence + 1,
                location: leg[1],
            },
            distance_km: haversine_distance(leg[0], leg[1]),
            initial_bearing: initial_bearing(leg[0], leg[1]),
        })
        .collect()
}
