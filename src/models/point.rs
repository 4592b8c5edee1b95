//! Geographic primitives shared by the route index, course loader and map.

use geo::{BoundingRect, Coord, LineString};
use serde::{Deserialize, Serialize};

/// Geographic point (lat/lon, degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Linear interpolation towards `other`; `alpha` of 0 is `self`, 1 is `other`.
    pub fn lerp(&self, other: &GeoPoint, alpha: f64) -> GeoPoint {
        GeoPoint {
            lat: self.lat + (other.lat - self.lat) * alpha,
            lon: self.lon + (other.lon - self.lon) * alpha,
        }
    }

    /// Arithmetic mean of a set of points
    pub fn mean(points: &[GeoPoint]) -> Option<GeoPoint> {
        if points.is_empty() {
            return None;
        }
        let n = points.len() as f64;
        let (lat, lon) = points
            .iter()
            .fold((0.0, 0.0), |(lat, lon), p| (lat + p.lat, lon + p.lon));
        Some(GeoPoint::new(lat / n, lon / n))
    }

    /// `[lat, lon]` pair in the order Leaflet expects
    pub fn to_latlng(&self) -> [f64; 2] {
        [self.lat, self.lon]
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {:?})", self.lat, self.lon)
    }
}

impl From<GeoPoint> for Coord<f64> {
    fn from(p: GeoPoint) -> Self {
        Coord { x: p.lon, y: p.lat }
    }
}

/// Bounding box of a set of points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBbox {
    pub min: GeoPoint,
    pub max: GeoPoint,
}

impl GeoBbox {
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min: GeoPoint::new(min_lat, min_lon),
            max: GeoPoint::new(max_lat, max_lon),
        }
    }

    /// Bounding box of a polyline, `None` when it is empty
    pub fn of_points(points: &[GeoPoint]) -> Option<Self> {
        let line: LineString<f64> = points.iter().copied().map(Coord::from).collect();
        let rect = line.bounding_rect()?;
        Some(Self::new(
            rect.min().y,
            rect.min().x,
            rect.max().y,
            rect.max().x,
        ))
    }

    pub fn center(&self) -> GeoPoint {
        self.min.lerp(&self.max, 0.5)
    }
}
