// Unit tests for Flight Corridor

use flight_corridor::core::{
    bounds::{create_bounding_box, is_within_bounding_box},
    distance::{haversine_distance, initial_bearing},
    filters::filter_in_corridor,
};
use flight_corridor::models::{GeoPoint, PointOfInterest, TierRadiusTable};
use geo::{HaversineBearing, HaversineDistance, Point};

/// Small deterministic generator so the property checks are reproducible
struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.next_f64()
    }

    fn point(&mut self) -> GeoPoint {
        GeoPoint::new(self.range(-89.0, 89.0), self.range(-179.0, 179.0))
    }
}

#[test]
fn test_haversine_distance_zero() {
    let nyc = GeoPoint::new(40.7128, -74.0060);
    assert_eq!(haversine_distance(nyc, nyc), 0.0);
}

#[test]
fn test_haversine_symmetry() {
    let mut rng = Lcg(7);
    for _ in 0..500 {
        let (a, b) = (rng.point(), rng.point());
        let ab = haversine_distance(a, b);
        let ba = haversine_distance(b, a);
        assert!((ab - ba).abs() <= 1e-6 * ab.max(1.0), "{:?} {:?}: {} vs {}", a, b, ab, ba);
    }
}

#[test]
fn test_haversine_triangle_inequality() {
    let mut rng = Lcg(11);
    for _ in 0..500 {
        let (a, b, c) = (rng.point(), rng.point(), rng.point());
        let direct = haversine_distance(a, c);
        let via = haversine_distance(a, b) + haversine_distance(b, c);
        assert!(direct <= via + 1e-6, "{} > {}", direct, via);
    }
}

#[test]
fn test_haversine_matches_geo_crate() {
    let mut rng = Lcg(13);
    for _ in 0..200 {
        let (a, b) = (rng.point(), rng.point());
        let ours = haversine_distance(a, b);
        // geo works in meters on a 6371.0088 km sphere
        let theirs = Point::new(a.lon, a.lat).haversine_distance(&Point::new(b.lon, b.lat)) / 1000.0;
        assert!((ours - theirs).abs() <= 1e-5 * theirs.max(1.0), "{} vs {}", ours, theirs);
    }
}

#[test]
fn test_bearing_matches_geo_crate() {
    let mut rng = Lcg(17);
    for _ in 0..200 {
        let (a, b) = (rng.point(), rng.point());
        let ours = initial_bearing(a, b);
        let theirs = Point::new(a.lon, a.lat)
            .haversine_bearing(Point::new(b.lon, b.lat))
            .rem_euclid(360.0);
        let diff = (ours - theirs).abs();
        assert!(diff.min(360.0 - diff) < 1e-6, "{} vs {}", ours, theirs);
    }
}

#[test]
fn test_route_waypoints_inside_own_bounding_box() {
    let mut rng = Lcg(19);
    for _ in 0..200 {
        let waypoints: Vec<GeoPoint> = (0..4).map(|_| rng.point()).collect();
        let buffer = rng.range(0.0, 200.0);
        let bbox = create_bounding_box(&waypoints, buffer);
        for w in &waypoints {
            assert!(is_within_bounding_box(*w, &bbox), "{:?} outside {:?}", w, bbox);
        }
    }
}

#[test]
fn test_bounding_box_expands_by_buffer() {
    // 10°x10° route box, 80 + 50 km buffer ≈ 1.17° latitude at the equator
    let route = [GeoPoint::new(-5.0, 0.0), GeoPoint::new(5.0, 10.0)];
    let bbox = create_bounding_box(&route, 130.0);

    let lat_expansion = bbox.max_lat - 5.0;
    assert!((lat_expansion - 1.17).abs() < 0.01, "got {}", lat_expansion);
    assert!((-5.0 - bbox.min_lat - lat_expansion).abs() < 1e-12);
    // Mean latitude 0, so longitude expands by the same amount
    assert!((bbox.max_lon - 10.0 - lat_expansion).abs() < 1e-9);
}

#[test]
fn test_corridor_monotonic_in_radius() {
    let mut rng = Lcg(23);
    let route = [
        GeoPoint::new(48.0, 2.0),
        GeoPoint::new(50.0, 10.0),
        GeoPoint::new(45.0, 15.0),
    ];
    let points: Vec<PointOfInterest> = (0..2000)
        .map(|i| {
            PointOfInterest::new(
                format!("p{}", i),
                rng.range(42.0, 53.0),
                rng.range(-2.0, 19.0),
                (i % 3 + 1) as u8,
            )
        })
        .collect();

    for tier in 1..=3u8 {
        let mut previous: Option<Vec<String>> = None;
        for radius in [0.0, 5.0, 20.0, 60.0, 150.0, 400.0] {
            let table = TierRadiusTable::default().with_radius(tier, radius);
            let kept: Vec<String> = filter_in_corridor(&points, &route, &table)
                .into_iter()
                .filter(|p| p.tier == tier)
                .map(|p| p.name.clone())
                .collect();

            if let Some(prev) = &previous {
                assert!(
                    prev.iter().all(|name| kept.contains(name)),
                    "tier {} lost points when radius grew to {}",
                    tier,
                    radius
                );
            }
            previous = Some(kept);
        }
    }
}

#[test]
fn test_nan_points_never_survive() {
    let route = [GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 10.0)];
    let points = vec![
        PointOfInterest::new("nan lat", f64::NAN, 5.0, 1),
        PointOfInterest::new("nan lon", 0.0, f64::NAN, 1),
        PointOfInterest::new("fine", 0.0, 5.0, 1),
    ];

    let kept = filter_in_corridor(&points, &route, &TierRadiusTable::default());
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].name, "fine");
}
