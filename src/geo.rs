//! Great-circle arithmetic over GPS fix streams.

use crate::models::gps_fix::GpsFix;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points, in kilometers.
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lat2) = (lat1.to_radians(), lat2.to_radians());
    let dlat = lat2 - lat1;
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// Cumulative distance along consecutive fixes, full precision. Zero for an
/// empty or singleton track. Rounding happens at the persistence point, not
/// here.
pub fn total_distance(fixes: &[GpsFix]) -> f64 {
    fixes
        .windows(2)
        .map(|pair| {
            haversine(
                pair[0].latitude,
                pair[0].longitude,
                pair[1].latitude,
                pair[1].longitude,
            )
        })
        .sum()
}

/// Round to two decimals for storage.
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}
