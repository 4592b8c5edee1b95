//! Participant records scraped from the tracking sheet.

use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Font Awesome icon and awesome-markers color for a participant's marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub icon: String,
    pub color: String,
}

impl MarkerStyle {
    pub fn new(icon: &str, color: &str) -> Self {
        Self {
            icon: icon.to_string(),
            color: color.to_string(),
        }
    }
}

/// One runner from the tracking sheet.
///
/// `position` is derived from `miles` once the route index is available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,

    /// Country code from the sheet (e.g. "CZ")
    pub country: String,

    /// Reported cumulative miles
    pub miles: f64,

    /// Marker style from the roster, `None` when the runner is not listed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<MarkerStyle>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<GeoPoint>,
}

impl Participant {
    pub fn new(name: &str, country: &str, miles: f64) -> Self {
        Self {
            name: name.to_string(),
            country: country.to_string(),
            miles,
            style: None,
            position: None,
        }
    }

    /// Popup text shown when the marker is clicked
    pub fn popup(&self) -> Option<String> {
        let position = self.position?;
        Some(format!("{},\n{:?}mi,\n{}", self.name, self.miles, position))
    }
}

/// Named point placemark from the course document (mile markers, aid stations)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    pub position: GeoPoint,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_keeps_decimal_point() {
        let mut p = Participant::new("Richard Bijecek", "CZ", 250.0);
        p.position = Some(GeoPoint::new(35.0, -86.0));
        assert_eq!(
            p.popup().as_deref(),
            Some("Richard Bijecek,\n250.0mi,\n(35.0, -86.0)")
        );
    }

    #[test]
    fn test_popup_requires_position() {
        let mut p = Participant::new("Petr Simecek", "CZ", 412.5);
        assert_eq!(p.popup(), None);

        p.position = Some(GeoPoint::new(35.5, -86.25));
        assert_eq!(
            p.popup().as_deref(),
            Some("Petr Simecek,\n412.5mi,\n(35.5, -86.25)")
        );
    }
}
