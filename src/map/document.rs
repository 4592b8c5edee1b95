use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use super::template::MAP_HTML;
use crate::course::Course;
use crate::models::{GeoBbox, GeoPoint, Participant, Waypoint};

pub const DEFAULT_ZOOM: u8 = 12;

const DEFAULT_ICON: &str = "circle";
const DEFAULT_COLOR: &str = "blue";
const ICON_PREFIX: &str = "fa";

/// Participant marker as embedded in the page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub position: [f64; 2],
    pub tooltip: String,
    pub popup: String,
    pub icon: String,
    pub color: String,
    pub prefix: String,
}

impl MapMarker {
    /// Marker for a participant whose position has been computed
    pub fn from_participant(participant: &Participant) -> Option<Self> {
        let position = participant.position?;
        let popup = participant.popup()?;
        let (icon, color) = match &participant.style {
            Some(style) => (style.icon.clone(), style.color.clone()),
            None => (DEFAULT_ICON.to_string(), DEFAULT_COLOR.to_string()),
        };

        Some(Self {
            position: position.to_latlng(),
            tooltip: escape_html(&participant.name),
            popup: escape_html(&popup).replace('\n', "<br>"),
            icon,
            color,
            prefix: ICON_PREFIX.to_string(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
struct WaypointData {
    position: [f64; 2],
    name: String,
}

#[derive(Debug, Serialize)]
struct MapData<'a> {
    center: [f64; 2],
    zoom: u8,
    polylines: &'a [Vec<[f64; 2]>],
    waypoints: &'a [WaypointData],
    markers: &'a [MapMarker],
}

/// In-memory Leaflet map, rendered to one HTML file
pub struct MapDocument {
    title: String,
    center: GeoPoint,
    zoom: u8,
    generated_at: DateTime<Utc>,
    polylines: Vec<Vec<[f64; 2]>>,
    waypoints: Vec<WaypointData>,
    markers: Vec<MapMarker>,
}

impl MapDocument {
    pub fn new(center: GeoPoint, zoom: u8) -> Self {
        Self {
            title: "Race map".to_string(),
            center,
            zoom,
            generated_at: Utc::now(),
            polylines: Vec::new(),
            waypoints: Vec::new(),
            markers: Vec::new(),
        }
    }

    /// Map of the course with one marker per located participant.
    ///
    /// Centered on the mean participant position, or on the course when
    /// nobody has been located.
    pub fn for_race(course: &Course, participants: &[Participant], zoom: u8) -> Self {
        let positions: Vec<GeoPoint> = participants.iter().filter_map(|p| p.position).collect();
        let center = GeoPoint::mean(&positions)
            .or_else(|| GeoBbox::of_points(&course.track).map(|b| b.center()))
            .unwrap_or(GeoPoint::new(0.0, 0.0));

        let mut doc = Self::new(center, zoom);
        doc.add_polyline(&course.track);
        for waypoint in &course.waypoints {
            doc.add_waypoint(waypoint);
        }
        for marker in participants.iter().filter_map(MapMarker::from_participant) {
            doc.add_marker(marker);
        }
        doc
    }

    pub fn center(&self) -> GeoPoint {
        self.center
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn add_polyline(&mut self, points: &[GeoPoint]) {
        self.polylines
            .push(points.iter().map(GeoPoint::to_latlng).collect());
    }

    pub fn add_waypoint(&mut self, waypoint: &Waypoint) {
        self.waypoints.push(WaypointData {
            position: waypoint.position.to_latlng(),
            name: escape_html(&waypoint.name),
        });
    }

    pub fn add_marker(&mut self, marker: MapMarker) {
        self.markers.push(marker);
    }

    pub fn markers(&self) -> &[MapMarker] {
        &self.markers
    }

    /// Full HTML page
    pub fn render(&self) -> Result<String> {
        let data = MapData {
            center: self.center.to_latlng(),
            zoom: self.zoom,
            polylines: &self.polylines,
            waypoints: &self.waypoints,
            markers: &self.markers,
        };
        // A literal "</" would close the script element early
        let json = serde_json::to_string(&data)
            .context("Failed to serialize map data")?
            .replace("</", "<\\/");

        Ok(MAP_HTML
            .replace("__TITLE__", &escape_html(&self.title))
            .replace("__GENERATED__", &self.generated_at.to_rfc3339())
            .replace("__MAP_DATA__", &json))
    }

    /// Render and write the page, creating parent directories
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let html = self.render()?;
        fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))?;
        info!(
            "Wrote map with {} markers to {}",
            self.markers.len(),
            path.display()
        );
        Ok(())
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MarkerStyle;

    fn runner() -> Participant {
        let mut p = Participant::new("Karla Fejfarova", "CZ", 250.0);
        p.position = Some(GeoPoint::new(35.25, -88.5));
        p.style = Some(MarkerStyle::new("female", "orange"));
        p
    }

    #[test]
    fn test_marker_from_participant() {
        let marker = MapMarker::from_participant(&runner()).unwrap();
        assert_eq!(marker.position, [35.25, -88.5]);
        assert_eq!(marker.tooltip, "Karla Fejfarova");
        assert_eq!(marker.popup, "Karla Fejfarova,<br>250.0mi,<br>(35.25, -88.5)");
        assert_eq!(marker.icon, "female");
        assert_eq!(marker.color, "orange");
        assert_eq!(marker.prefix, "fa");
    }

    #[test]
    fn test_marker_default_style() {
        let mut p = runner();
        p.style = None;
        let marker = MapMarker::from_participant(&p).unwrap();
        assert_eq!(marker.icon, DEFAULT_ICON);
        assert_eq!(marker.color, DEFAULT_COLOR);
    }

    #[test]
    fn test_marker_needs_position() {
        let p = Participant::new("Jan Novak", "CZ", 10.0);
        assert!(MapMarker::from_participant(&p).is_none());
    }

    #[test]
    fn test_render_embeds_data() {
        let mut doc = MapDocument::new(GeoPoint::new(35.0, -87.0), DEFAULT_ZOOM)
            .with_title("GVRAT <CZ>");
        doc.add_polyline(&[GeoPoint::new(35.0, -90.0), GeoPoint::new(36.0, -82.0)]);
        doc.add_waypoint(&Waypoint {
            name: "Mile 1".to_string(),
            position: GeoPoint::new(35.0, -89.9),
        });
        let mut p = runner();
        p.name = "</script><b>x</b>".to_string();
        doc.add_marker(MapMarker::from_participant(&p).unwrap());

        let html = doc.render().unwrap();
        assert!(html.contains("<title>GVRAT &lt;CZ&gt;</title>"));
        assert!(html.contains("[[[35.0,-90.0],[36.0,-82.0]]]"));
        assert!(html.contains("\"zoom\":12"));
        assert!(html.contains("Mile 1"));
        assert!(html.contains("&lt;/script&gt;"));
        assert!(!html.contains("</script><b>"));
        assert!(!html.contains("__MAP_DATA__"));
    }

    #[test]
    fn test_race_map_centered_on_participants() {
        let course = Course {
            track: vec![GeoPoint::new(35.0, -90.0), GeoPoint::new(36.0, -82.0)],
            waypoints: vec![],
        };
        let mut a = runner();
        a.position = Some(GeoPoint::new(35.0, -88.0));
        let mut b = runner();
        b.position = Some(GeoPoint::new(35.5, -86.0));
        let unplaced = Participant::new("Jan Novak", "CZ", 1.0);

        let doc = MapDocument::for_race(&course, &[a, b, unplaced], DEFAULT_ZOOM);
        assert_eq!(doc.center(), GeoPoint::new(35.25, -87.0));
        assert_eq!(doc.markers().len(), 2);
    }

    #[test]
    fn test_race_map_without_participants() {
        let course = Course {
            track: vec![GeoPoint::new(35.0, -90.0), GeoPoint::new(36.0, -82.0)],
            waypoints: vec![],
        };
        let doc = MapDocument::for_race(&course, &[], DEFAULT_ZOOM);
        assert_eq!(doc.center(), GeoPoint::new(35.5, -86.0));
        assert!(doc.markers().is_empty());
    }

    #[test]
    fn test_write_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs").join("index.html");

        let doc = MapDocument::new(GeoPoint::new(0.0, 0.0), DEFAULT_ZOOM);
        doc.write_to(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<!doctype html>"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a & <b> \"c\""), "a &amp; &lt;b&gt; &quot;c&quot;");
    }
}
