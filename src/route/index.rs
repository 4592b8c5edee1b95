//! Cumulative-distance index over the course polyline.

use thiserror::Error;
use tracing::{debug, info};

use super::great_circle_miles;
use crate::models::{GeoPoint, Participant};

#[derive(Debug, Error, PartialEq)]
pub enum RouteError {
    #[error("route needs at least 2 points, got {0}")]
    TooShort(usize),

    #[error("expected {expected} cumulative distances for the track, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("cumulative distances decrease at segment {0}")]
    NotMonotonic(usize),

    #[error("cumulative distance at segment {0} is not finite")]
    NonFinite(usize),

    #[error("{miles} miles is outside the route (0 to {total} miles)")]
    OutOfRange { miles: f64, total: f64 },
}

/// Great-circle distances between consecutive points
pub fn segment_distances(points: &[GeoPoint]) -> Vec<f64> {
    points
        .windows(2)
        .map(|pair| great_circle_miles(&pair[0], &pair[1]))
        .collect()
}

/// Running sum of segment lengths
pub fn cumulative_distances(segments: &[f64]) -> Vec<f64> {
    segments
        .iter()
        .scan(0.0, |total, d| {
            *total += d;
            Some(*total)
        })
        .collect()
}

/// Track points plus the cumulative distance at the end of each segment.
///
/// `cumulative[i]` is the distance from the first point to `points[i + 1]`,
/// so there is one entry per segment and the table never decreases.
#[derive(Debug, Clone)]
pub struct RouteIndex {
    points: Vec<GeoPoint>,
    cumulative: Vec<f64>,
}

impl RouteIndex {
    /// Build the index from the course track
    pub fn from_track(points: Vec<GeoPoint>) -> Result<Self, RouteError> {
        if points.len() < 2 {
            return Err(RouteError::TooShort(points.len()));
        }
        let cumulative = cumulative_distances(&segment_distances(&points));

        let index = Self::from_parts(points, cumulative)?;
        info!(
            "Route index built: {} points, {:.2} miles",
            index.points.len(),
            index.total_distance()
        );
        Ok(index)
    }

    /// Build the index from precomputed cumulative distances
    pub fn from_parts(points: Vec<GeoPoint>, cumulative: Vec<f64>) -> Result<Self, RouteError> {
        if points.len() < 2 {
            return Err(RouteError::TooShort(points.len()));
        }
        if cumulative.len() != points.len() - 1 {
            return Err(RouteError::LengthMismatch {
                expected: points.len() - 1,
                actual: cumulative.len(),
            });
        }
        if let Some(i) = cumulative.iter().position(|d| !d.is_finite()) {
            return Err(RouteError::NonFinite(i));
        }
        if let Some(i) = cumulative.windows(2).position(|w| w[1] < w[0]) {
            return Err(RouteError::NotMonotonic(i + 1));
        }
        Ok(Self { points, cumulative })
    }

    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    /// Length of the whole route in miles
    pub fn total_distance(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Interpolated position `miles` along the route.
    ///
    /// Picks the first segment whose end reaches `miles` and interpolates
    /// linearly between its two endpoints. The distance before the first
    /// segment is 0.
    pub fn position_at_distance(&self, miles: f64) -> Result<GeoPoint, RouteError> {
        let total = self.total_distance();
        if !miles.is_finite() || miles < 0.0 || miles > total {
            return Err(RouteError::OutOfRange { miles, total });
        }

        // First segment end at or past `miles`; the table is sorted
        let i = self.cumulative.partition_point(|&d| d < miles);
        let start = if i == 0 { 0.0 } else { self.cumulative[i - 1] };
        let end = self.cumulative[i];

        let span = end - start;
        let alpha = if span > 0.0 { (miles - start) / span } else { 0.0 };

        Ok(self.points[i].lerp(&self.points[i + 1], alpha))
    }

    /// Fill in each participant's position from their reported miles
    pub fn locate(&self, participants: &mut [Participant]) -> Result<(), RouteError> {
        for participant in participants.iter_mut() {
            let position = self.position_at_distance(participant.miles)?;
            debug!(
                "{} at {} miles -> {}",
                participant.name, participant.miles, position
            );
            participant.position = Some(position);
        }
        Ok(())
    }
}
