//! Core data models for the race map.

pub mod participant;
pub mod point;

pub use participant::{MarkerStyle, Participant, Waypoint};
pub use point::{GeoBbox, GeoPoint};
