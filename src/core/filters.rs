use crate::core::bounds::{create_bounding_box, is_within_bounding_box};
use crate::core::corridor::distance_from_path;
use crate::models::{BoundingBox, CorridorCandidate, CorridorMatch, GeoPoint, TierRadiusTable};

/// Safety margin added to the largest tier radius when sizing the prefilter box
pub const DEFAULT_MARGIN_KM: f64 = 50.0;

/// Stage 1 - cheap rectangular pre-filter
#[inline]
pub fn passes_prefilter<T: CorridorCandidate>(candidate: &T, bbox: &BoundingBox) -> bool {
    is_within_bounding_box(candidate.location(), bbox)
}

/// Stage 2 - true distance to the route against the candidate's tier radius
///
/// Candidates whose tier has no radius are rejected without measuring.
#[inline]
pub fn corridor_match<'a, T: CorridorCandidate>(
    candidate: &'a T,
    path: &[GeoPoint],
    tiers: &TierRadiusTable,
) -> Option<CorridorMatch<'a, T>> {
    let radius_km = tiers.radius_for(candidate.tier())?;
    let distance_km = distance_from_path(candidate.location(), path);

    (distance_km <= radius_km).then_some(CorridorMatch {
        point: candidate,
        distance_km,
    })
}

/// Filter points to those inside their tier's corridor around `path`
///
/// Uses a prefilter box of the largest tier radius plus [`DEFAULT_MARGIN_KM`].
/// Survivors keep their input order. `path` must hold at least two waypoints.
pub fn filter_in_corridor<'a, T: CorridorCandidate>(
    points: &'a [T],
    path: &[GeoPoint],
    tiers: &TierRadiusTable,
) -> Vec<&'a T> {
    let bbox = create_bounding_box(path, tiers.max_radius() + DEFAULT_MARGIN_KM);

    points
        .iter()
        .filter(|p| passes_prefilter(*p, &bbox))
        .filter_map(|p| corridor_match(p, path, tiers))
        .map(|m| m.point)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PointOfInterest;

    fn equator_route() -> Vec<GeoPoint> {
        vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 10.0), GeoPoint::new(0.0, 20.0)]
    }

    #[test]
    fn test_unknown_tier_rejected() {
        let point = PointOfInterest::new("on route", 0.0, 5.0, 9);
        assert!(corridor_match(&point, &equator_route(), &TierRadiusTable::default()).is_none());
    }

    #[test]
    fn test_match_reports_distance() {
        let point = PointOfInterest::new("near", 0.05, 5.0, 3);
        let m = corridor_match(&point, &equator_route(), &TierRadiusTable::default()).unwrap();
        assert!((m.distance_km - 5.56).abs() < 0.01, "got {}", m.distance_km);
        assert!(std::ptr::eq(m.point, &point));
    }

    #[test]
    fn test_tier_radius_applies_per_point() {
        // ~11km off the route: inside tier 1 and 2, outside tier 3 (8km)
        let points = vec![
            PointOfInterest::new("major", 0.1, 5.0, 1),
            PointOfInterest::new("regional", 0.1, 6.0, 2),
            PointOfInterest::new("local", 0.1, 7.0, 3),
        ];
        let kept = filter_in_corridor(&points, &equator_route(), &TierRadiusTable::default());
        let names: Vec<&str> = kept.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["major", "regional"]);
    }

    #[test]
    fn test_preserves_input_order() {
        let points = vec![
            PointOfInterest::new("c", 0.0, 15.0, 1),
            PointOfInterest::new("far", 30.0, 15.0, 1),
            PointOfInterest::new("a", 0.0, 2.0, 1),
            PointOfInterest::new("b", 0.0, 9.0, 1),
        ];
        let kept = filter_in_corridor(&points, &equator_route(), &TierRadiusTable::default());
        let names: Vec<&str> = kept.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }
}
