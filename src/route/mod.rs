//! Route Distance Index.
//!
//! Turns the course polyline into a cumulative-distance table and answers
//! "where along the route is the runner who has covered k miles?".

mod distance;
mod index;

pub use distance::{great_circle_miles, EARTH_RADIUS_MILES};
pub use index::{cumulative_distances, segment_distances, RouteError, RouteIndex};
