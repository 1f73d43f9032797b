use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{AircraftType, EmissionRates};

/// Assumed constant cruise speed of every aircraft, in km/h
pub const CRUISE_SPEED_KMH: f64 = 500.0;
/// Factor applied to the published emission rates of every aircraft type
pub const CORRECTION_FACTOR: f64 = 3.16;

/// The assumptions of the emission model
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub cruise_speed_kmh: f64,
    pub correction_factor: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cruise_speed_kmh: CRUISE_SPEED_KMH,
            correction_factor: CORRECTION_FACTOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FootprintError {
    #[error("unknown or missing emission rate for aircraft type {0}")]
    UnknownAircraftType(AircraftType),
    #[error("{value} kg CO2 is not a valid footprint")]
    Invalid { value: f64 },
}

/// Returns the hours it takes to fly `distance_km` at `cruise_speed_kmh`
pub fn flight_hours(distance_km: f64, cruise_speed_kmh: f64) -> f64 {
    distance_km / cruise_speed_kmh
}

/// Returns the estimated kg of CO2 emitted by `aircraft_type` flying `distance_km`
/// at a constant `cruise_speed_kmh`.
/// # Error
/// Errors when `aircraft_type` has no rate in `rates`, or when the result is
/// not a finite, non-negative number.
pub fn footprint(
    aircraft_type: &AircraftType,
    distance_km: f64,
    rates: &EmissionRates,
    cruise_speed_kmh: f64,
) -> Result<f64, FootprintError> {
    let rate = rates
        .get(aircraft_type)
        .ok_or_else(|| FootprintError::UnknownAircraftType(aircraft_type.clone()))?;

    let value = rate * flight_hours(distance_km, cruise_speed_kmh);
    (value.is_finite() && value >= 0.0)
        .then_some(value)
        .ok_or(FootprintError::Invalid { value })
}
