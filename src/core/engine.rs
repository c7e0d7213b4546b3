use rayon::prelude::*;

use crate::core::{
    bounds::create_bounding_box,
    filters::{corridor_match, passes_prefilter, DEFAULT_MARGIN_KM},
};
use crate::models::{CorridorCandidate, CorridorMatch, GeoPoint, Route, TierRadiusTable};

/// Prefiltered sets larger than this are measured on the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 2048;

/// Result of a corridor query
#[derive(Debug)]
pub struct CorridorOutcome<'a, T> {
    pub matches: Vec<CorridorMatch<'a, T>>,
    pub total_candidates: usize,
    pub prefiltered: usize,
}

/// Corridor orchestrator - implements the two-stage filtering pipeline
///
/// # Pipeline Stages
/// 1. Bounding box pre-filter sized to the largest tier radius plus a margin
/// 2. Great-circle distance to the route against the candidate's tier radius
///
/// The engine holds configuration only; every call is a pure function of
/// its inputs.
#[derive(Debug, Clone)]
pub struct CorridorEngine {
    tiers: TierRadiusTable,
    margin_km: f64,
    parallel_threshold: usize,
}

impl CorridorEngine {
    pub fn new(tiers: TierRadiusTable, margin_km: f64) -> Self {
        Self {
            tiers,
            margin_km,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    pub fn with_default_tiers() -> Self {
        Self::new(TierRadiusTable::default(), DEFAULT_MARGIN_KM)
    }

    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    pub fn tiers(&self) -> &TierRadiusTable {
        &self.tiers
    }

    /// Prefilter buffer: largest tier radius plus the margin
    pub fn buffer_km(&self) -> f64 {
        self.tiers.max_radius() + self.margin_km
    }

    /// Points inside their tier's corridor, in input order
    pub fn filter<'a, T: CorridorCandidate>(&self, points: &'a [T], route: &Route) -> Vec<&'a T> {
        self.filter_with_distances(points, route)
            .into_iter()
            .map(|m| m.point)
            .collect()
    }

    /// Like [`filter`](Self::filter), keeping each survivor's distance to the route
    pub fn filter_with_distances<'a, T: CorridorCandidate>(
        &self,
        points: &'a [T],
        route: &Route,
    ) -> Vec<CorridorMatch<'a, T>> {
        let path = route.points();
        self.prefilter(points, path)
            .into_iter()
            .filter_map(|p| corridor_match(p, path, &self.tiers))
            .collect()
    }

    /// Same output as [`filter_with_distances`](Self::filter_with_distances),
    /// measuring distances on the rayon pool
    pub fn filter_par<'a, T: CorridorCandidate + Sync>(
        &self,
        points: &'a [T],
        route: &Route,
    ) -> Vec<CorridorMatch<'a, T>> {
        let path = route.points();
        self.prefilter(points, path)
            .into_par_iter()
            .filter_map(|p| corridor_match(p, path, &self.tiers))
            .collect()
    }

    /// Run the full pipeline, going parallel once the prefiltered set exceeds
    /// the configured threshold
    pub fn run<'a, T: CorridorCandidate + Sync>(
        &self,
        points: &'a [T],
        route: &Route,
    ) -> CorridorOutcome<'a, T> {
        let path = route.points();
        let total_candidates = points.len();

        // Stage 1: Bounding box pre-filter
        let survivors = self.prefilter(points, path);
        let prefiltered = survivors.len();

        // Stage 2: Tiered corridor distance
        let matches: Vec<CorridorMatch<'a, T>> = if prefiltered > self.parallel_threshold {
            survivors
                .into_par_iter()
                .filter_map(|p| corridor_match(p, path, &self.tiers))
                .collect()
        } else {
            survivors
                .into_iter()
                .filter_map(|p| corridor_match(p, path, &self.tiers))
                .collect()
        };

        tracing::debug!(
            total_candidates,
            prefiltered,
            matched = matches.len(),
            legs = path.len() - 1,
            "Corridor filter complete"
        );

        CorridorOutcome {
            matches,
            total_candidates,
            prefiltered,
        }
    }

    fn prefilter<'a, T: CorridorCandidate>(&self, points: &'a [T], path: &[GeoPoint]) -> Vec<&'a T> {
        let bbox = create_bounding_box(path, self.buffer_km());
        points.iter().filter(|p| passes_prefilter(*p, &bbox)).collect()
    }
}

impl Default for CorridorEngine {
    fn default() -> Self {
        Self::with_default_tiers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PointOfInterest;

    fn equator_route() -> Route {
        Route::new(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 10.0),
            GeoPoint::new(0.0, 20.0),
        ])
        .unwrap()
    }

    fn scattered_points(count: usize) -> Vec<PointOfInterest> {
        (0..count)
            .map(|i| {
                let lat = ((i * 37) % 400) as f64 / 100.0 - 2.0;
                let lon = ((i * 53) % 2600) as f64 / 100.0 - 3.0;
                PointOfInterest::new(format!("poi-{}", i), lat, lon, (i % 3 + 1) as u8)
            })
            .collect()
    }

    #[test]
    fn test_buffer_is_max_radius_plus_margin() {
        let engine = CorridorEngine::with_default_tiers();
        assert_eq!(engine.buffer_km(), 130.0);
    }

    #[test]
    fn test_run_reports_stage_counts() {
        let engine = CorridorEngine::with_default_tiers();
        let points = vec![
            PointOfInterest::new("on route", 0.0, 5.0, 3),
            PointOfInterest::new("inside box, outside radius", 0.5, 5.0, 3),
            PointOfInterest::new("far away", 45.0, 5.0, 1),
        ];

        let outcome = engine.run(&points, &equator_route());

        assert_eq!(outcome.total_candidates, 3);
        assert_eq!(outcome.prefiltered, 2);
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].point.name, "on route");
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let engine = CorridorEngine::with_default_tiers();
        let points = scattered_points(5000);
        let route = equator_route();

        let sequential: Vec<&str> = engine
            .filter_with_distances(&points, &route)
            .iter()
            .map(|m| m.point.name.as_str())
            .collect();
        let parallel: Vec<&str> = engine
            .filter_par(&points, &route)
            .iter()
            .map(|m| m.point.name.as_str())
            .collect();

        assert!(!sequential.is_empty());
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_run_uses_parallel_path_above_threshold() {
        let engine = CorridorEngine::with_default_tiers().with_parallel_threshold(10);
        let points = scattered_points(500);
        let route = equator_route();

        let outcome = engine.run(&points, &route);
        let expected = engine.filter(&points, &route);

        assert!(outcome.prefiltered > 10);
        let got: Vec<&PointOfInterest> = outcome.matches.iter().map(|m| m.point).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_filter_returns_input_references() {
        let engine = CorridorEngine::with_default_tiers();
        let points = vec![PointOfInterest::new("on route", 0.0, 12.0, 1)];
        let kept = engine.filter(&points, &equator_route());
        assert_eq!(kept.len(), 1);
        assert!(std::ptr::eq(kept[0], &points[0]));
    }
}
