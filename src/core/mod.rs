// Core algorithm exports
pub mod bounds;
pub mod corridor;
pub mod distance;
pub mod engine;
pub mod filters;

pub use bounds::{create_bounding_box, is_within_bounding_box};
pub use corridor::{distance_from_path, point_to_segment_distance};
pub use distance::{
    bearing_difference, destination_point, great_circle_path, haversine_distance, initial_bearing, intermediate_point,
    leg_summaries, route_distance_km,
};
pub use engine::{CorridorEngine, CorridorOutcome};
pub use filters::filter_in_corridor;
