//! Great-circle distance on a spherical Earth.

use crate::core::event::GeoPoint;

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points, in kilometers.
///
/// Every distance comparison in the crate goes through this function so that
/// filtering and clustering agree on who is a neighbor.
pub fn distance_km(p1: GeoPoint, p2: GeoPoint) -> f64 {
    let d_lat = (p2.latitude - p1.latitude).to_radians();
    let d_lon = (p2.longitude - p1.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + p1.latitude.to_radians().cos() * p2.latitude.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push `a` a hair above 1 for antipodal points
    let c = 2.0 * a.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}
