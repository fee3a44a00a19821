//! Tunable constants for dispatch economics and provider timeouts.
//!
//! Scoring weights live next to the matching rules they belong to
//! (`matching.rs`); this module holds the values an operator would
//! realistically retune per deployment region.

/// Flat fare covering the first [`INCLUDED_DISTANCE_KM`] of a dispatch.
pub const BASE_FARE: f64 = 50.0;

/// Per-kilometre rate beyond the included distance.
pub const PER_KM_RATE: f64 = 3.5;

/// Distance covered by the base fare.
pub const INCLUDED_DISTANCE_KM: f64 = 10.0;

/// Great-circle → road distance multiplier.
pub const ROAD_CIRCUITY_FACTOR: f64 = 1.4;

/// Applied to the whole fare for triage levels 1–2, after the per-km addition.
pub const EMERGENCY_SURCHARGE: f64 = 1.5;

/// Default bounded timeout for remote classification providers.
pub const PROVIDER_TIMEOUT_SECS: u64 = 30;

/// Assumed ambulance speed by triage level (emergency runs move faster).
pub fn ambulance_speed_kmh(triage_level: u8) -> f64 {
    match triage_level {
        1 => 60.0,
        2 => 50.0,
        _ => 40.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_table_by_triage_level() {
        assert_eq!(ambulance_speed_kmh(1), 60.0);
        assert_eq!(ambulance_speed_kmh(2), 50.0);
        assert_eq!(ambulance_speed_kmh(3), 40.0);
        assert_eq!(ambulance_speed_kmh(5), 40.0);
    }

    #[test]
    fn surcharge_and_circuity_are_multiplicative_factors() {
        assert!(EMERGENCY_SURCHARGE > 1.0);
        assert!(ROAD_CIRCUITY_FACTOR > 1.0);
    }

    #[test]
    fn base_fare_covers_positive_distance() {
        assert!(BASE_FARE > 0.0);
        assert!(INCLUDED_DISTANCE_KM > 0.0);
        assert!(PER_KM_RATE > 0.0);
    }
}
