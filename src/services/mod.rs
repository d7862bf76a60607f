//! Service module that exports interfaces to external applications, APIs, etc.

pub mod directions;
pub mod map;

// rexport some traits and utilty functions
pub use directions::{new_directions_handler, Directions, DirectionsService, TravelMode};
pub use map::{new_map_handler, MapSurface, Marker, Polyline};
