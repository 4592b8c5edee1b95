//! Interactive map output.
//!
//! Renders a single self-contained Leaflet page with the course polyline,
//! course waypoints and one marker per participant.

mod document;
mod template;

pub use document::{escape_html, MapDocument, MapMarker, DEFAULT_ZOOM};
