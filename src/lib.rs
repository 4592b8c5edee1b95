//! racemap - plots runners on a virtual race course.
//!
//! This library provides the course loader, route distance index, tracking
//! sheet scraper and map renderer used by the `generate` binary.

pub mod course;
pub mod map;
pub mod models;
pub mod roster;
pub mod route;
pub mod tracking;

pub use models::{GeoPoint, MarkerStyle, Participant, Waypoint};
pub use route::{RouteError, RouteIndex};
