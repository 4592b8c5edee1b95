use crate::models::GeoPoint;

/// Earth radius used for mileage along the course
pub const EARTH_RADIUS_MILES: f64 = 3965.0;

/// Great-circle distance in miles between two points (haversine formula).
///
/// Inputs are not range checked.
pub fn great_circle_miles(origin: &GeoPoint, destination: &GeoPoint) -> f64 {
    let dlat = (destination.lat - origin.lat).to_radians();
    let dlon = (destination.lon - origin.lon).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + origin.lat.to_radians().cos()
            * destination.lat.to_radians().cos()
            * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}
