//! Race course loading from a KMZ archive.
//!
//! The archive holds a single `doc.kml` with the route as a `LineString`
//! and named `Point` placemarks along it.

mod archive;
mod document;

pub use archive::{get_zip_file, load_course, COURSE_DOCUMENT};
pub use document::parse_kml;

use crate::models::{GeoPoint, Waypoint};

/// Parsed course document
#[derive(Debug, Clone)]
pub struct Course {
    pub track: Vec<GeoPoint>,
    pub waypoints: Vec<Waypoint>,
}
