use anyhow::{anyhow, bail, Result};
use kml::types::{Coord, Geometry, Placemark};
use kml::Kml;
use tracing::debug;

use super::Course;
use crate::models::{GeoPoint, Waypoint};

/// Parse a KML document into the course track and its waypoints.
///
/// Placemarks are collected from any depth (documents, folders). Point
/// placemarks become waypoints and the first line string is the track.
pub fn parse_kml(text: &str) -> Result<Course> {
    let kml: Kml<f64> = text
        .parse()
        .map_err(|err| anyhow!("Failed to parse KML document: {err}"))?;

    let mut waypoints = Vec::new();
    let mut track = None;
    collect(&kml, &mut waypoints, &mut track)?;

    let Some(track) = track else {
        bail!("KML has no LineString route");
    };
    if track.len() < 2 {
        bail!("Route has {} points, need at least 2", track.len());
    }

    Ok(Course { track, waypoints })
}

fn collect(
    kml: &Kml<f64>,
    waypoints: &mut Vec<Waypoint>,
    track: &mut Option<Vec<GeoPoint>>,
) -> Result<()> {
    match kml {
        Kml::KmlDocument(doc) => {
            for element in &doc.elements {
                collect(element, waypoints, track)?;
            }
        }
        Kml::Document { elements, .. } => {
            for element in elements {
                collect(element, waypoints, track)?;
            }
        }
        Kml::Folder(folder) => {
            for element in &folder.elements {
                collect(element, waypoints, track)?;
            }
        }
        Kml::Placemark(placemark) => collect_placemark(placemark, waypoints, track)?,
        Kml::LineString(line) if track.is_none() => {
            *track = Some(to_points(&line.coords)?);
        }
        _ => {}
    }
    Ok(())
}

fn collect_placemark(
    placemark: &Placemark<f64>,
    waypoints: &mut Vec<Waypoint>,
    track: &mut Option<Vec<GeoPoint>>,
) -> Result<()> {
    let name = placemark
        .name
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    match &placemark.geometry {
        Some(Geometry::Point(point)) => {
            let position = to_point(&point.coord)
                .map_err(|err| anyhow!("Waypoint '{}': {}", name, err))?;
            debug!("Waypoint '{}' at {}", name, position);
            waypoints.push(Waypoint { name, position });
        }
        Some(Geometry::LineString(line)) if track.is_none() => {
            *track = Some(to_points(&line.coords)?);
        }
        _ => {}
    }
    Ok(())
}

fn to_points(coords: &[Coord<f64>]) -> Result<Vec<GeoPoint>> {
    coords.iter().map(to_point).collect()
}

/// KML coordinates are lon,lat; both must be finite
fn to_point(coord: &Coord<f64>) -> Result<GeoPoint> {
    if !coord.x.is_finite() || !coord.y.is_finite() {
        bail!("Non-finite coordinate {},{}", coord.x, coord.y);
    }
    Ok(GeoPoint::new(coord.y, coord.x))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <name>GVRAT Course</name>
    <Placemark>
      <name>Start </name>
      <Point>
        <coordinates>-90.0500,35.1400,0</coordinates>
      </Point>
    </Placemark>
    <Placemark>
      <name>Mile 100 </name>
      <Point>
        <coordinates>-88.5,35.3,0</coordinates>
      </Point>
    </Placemark>
    <Placemark>
      <name>Route</name>
      <LineString>
        <tessellate>1</tessellate>
        <coordinates>
          -90.05,35.14,0
          -89.0,35.2,0
          -88.5,35.3,0
        </coordinates>
      </LineString>
    </Placemark>
  </Document>
</kml>"#;

    fn course_with_line(coords: &str) -> String {
        format!(
            "<kml><Document><Placemark><LineString><coordinates>{}</coordinates>\
             </LineString></Placemark></Document></kml>",
            coords
        )
    }

    #[test]
    fn test_parse_track_and_waypoints() {
        let course = parse_kml(SAMPLE).unwrap();

        assert_eq!(course.track.len(), 3);
        assert_eq!(course.track[0], GeoPoint::new(35.14, -90.05));
        assert_eq!(course.track[2], GeoPoint::new(35.3, -88.5));

        assert_eq!(course.waypoints.len(), 2);
        assert_eq!(course.waypoints[0].name, "Start");
        assert_eq!(course.waypoints[1].name, "Mile 100");
        assert_eq!(course.waypoints[1].position, GeoPoint::new(35.3, -88.5));
    }

    #[test]
    fn test_placemarks_in_nested_folders() {
        let kml = r#"<kml><Document><Folder><name>Layer 1</name><Folder>
            <Placemark><name>Aid</name><Point><coordinates>-87.0,35.0,0</coordinates></Point></Placemark>
            <Placemark><LineString><coordinates>-88.0,35.0,0 -87.0,35.0,0</coordinates></LineString></Placemark>
            </Folder></Folder></Document></kml>"#;
        let course = parse_kml(kml).unwrap();

        assert_eq!(course.track.len(), 2);
        assert_eq!(course.waypoints.len(), 1);
        assert_eq!(course.waypoints[0].position, GeoPoint::new(35.0, -87.0));
    }

    #[test]
    fn test_coordinates_without_altitude() {
        let course = parse_kml(&course_with_line("14.4,50.1 16.6,49.2")).unwrap();
        assert_eq!(
            course.track,
            vec![GeoPoint::new(50.1, 14.4), GeoPoint::new(49.2, 16.6)]
        );
    }

    #[test]
    fn test_non_finite_coordinate() {
        let kml = course_with_line("-86.0,35.0,0 nan,nan,0 -86.0,36.0,0");
        assert!(parse_kml(&kml).is_err());

        let kml = course_with_line("-86.0,35.0,0 inf,36.0,0");
        assert!(parse_kml(&kml).is_err());
    }

    #[test]
    fn test_single_point_route() {
        assert!(parse_kml(&course_with_line("-86.0,35.0,0")).is_err());
    }

    #[test]
    fn test_missing_route() {
        let kml = r#"<kml><Document><Placemark><name>A</name>
            <Point><coordinates>1,2</coordinates></Point></Placemark></Document></kml>"#;
        let err = parse_kml(kml).unwrap_err();
        assert!(err.to_string().contains("LineString"));
    }

    #[test]
    fn test_not_kml() {
        assert!(parse_kml("<gpx></gpx>").is_err());
    }
}
