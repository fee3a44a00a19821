//! Dispatch cost and ETA estimation: haversine distance with a road-circuity
//! correction, a flat-plus-per-km fare with an emergency surcharge, and a
//! triage-keyed speed table.

use serde::{Deserialize, Serialize};

use crate::config::{
    ambulance_speed_kmh, BASE_FARE, EMERGENCY_SURCHARGE, INCLUDED_DISTANCE_KM, PER_KM_RATE,
    ROAD_CIRCUITY_FACTOR,
};
use crate::error::TriageError;
use crate::models::GeoPoint;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Fare and timing estimate for one dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchEstimate {
    /// Road distance: great-circle distance × circuity factor.
    pub distance_km: f64,
    pub fare: f64,
    pub eta_minutes: u32,
}

/// Estimate distance, fare, and ETA between two geocoded points.
///
/// The emergency surcharge for triage levels 1–2 multiplies the whole fare
/// after the per-km addition. Invalid coordinates are the caller's bug and
/// are rejected before any computation.
pub fn estimate(
    pickup: GeoPoint,
    destination: GeoPoint,
    triage_level: u8,
) -> Result<DispatchEstimate, TriageError> {
    if !pickup.is_valid() || !destination.is_valid() {
        return Err(TriageError::InvalidInput(
            "pickup and destination must be finite, in-range coordinates".into(),
        ));
    }

    let distance_km = haversine_km(pickup, destination) * ROAD_CIRCUITY_FACTOR;

    let mut fare = BASE_FARE + (distance_km - INCLUDED_DISTANCE_KM).max(0.0) * PER_KM_RATE;
    if triage_level <= 2 {
        fare *= EMERGENCY_SURCHARGE;
    }

    let eta_minutes = (distance_km / ambulance_speed_kmh(triage_level) * 60.0).round() as u32;

    Ok(DispatchEstimate {
        distance_km,
        fare,
        eta_minutes,
    })
}

/// Great-circle distance between two points, in kilometres.
fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}
