use std::{
    collections::{hash_map::Entry, HashMap},
    sync::Arc,
};

use serde::{Deserialize, Serialize};

use crate::Error;

pub static EMISSION_RATES: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/src/emission_rates.csv"
));

/// The designation of a class of aircraft (e.g. `FALCON_7X`)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct AircraftType(Arc<str>);

impl AircraftType {
    pub fn new(designation: &str) -> Self {
        Self(designation.trim().into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AircraftType {
    fn from(designation: &str) -> Self {
        Self::new(designation)
    }
}

impl std::fmt::Display for AircraftType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// In-memory representation of the emissions of an aircraft type, as published
/// by its manufacturer
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EmissionRate {
    /// the type (e.g. `FALCON_7X`)
    pub aircraft_type: AircraftType,
    /// the published emissions in kg of CO2 per flight hour
    pub base_kg_per_hour: f64,
}

/// A map of [`AircraftType`] to its emission rate in kg of CO2 per flight hour,
/// with the correction factor already applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmissionRates {
    rates: HashMap<AircraftType, f64>,
}

impl EmissionRates {
    /// Builds the table from published rates, multiplying each by `correction_factor`.
    /// When an aircraft type is repeated, the first row wins.
    pub fn new(rates: impl IntoIterator<Item = EmissionRate>, correction_factor: f64) -> Self {
        let mut table = HashMap::<AircraftType, f64>::new();
        for rate in rates {
            match table.entry(rate.aircraft_type) {
                Entry::Vacant(entry) => {
                    entry.insert(rate.base_kg_per_hour * correction_factor);
                }
                Entry::Occupied(entry) => {
                    log::warn!(
                        "aircraft type {} has more than one emission rate; keeping {}",
                        entry.key(),
                        entry.get()
                    );
                }
            }
        }
        Self { rates: table }
    }

    /// Returns the rate in kg CO2 per flight hour of `aircraft_type`, if known
    pub fn get(&self, aircraft_type: &AircraftType) -> Option<f64> {
        self.rates.get(aircraft_type).copied()
    }

    /// The highest rate in the table, 0 when empty
    pub fn max(&self) -> f64 {
        self.rates.values().copied().fold(0.0, f64::max)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Reads [`EmissionRates`] from a CSV with columns `aircraft_type,base_kg_per_hour`.
/// # Error
/// Errors if the CSV is malformed
pub fn read_emission_rates(data: &[u8], correction_factor: f64) -> Result<EmissionRates, Error> {
    let rates = crate::csv::deserialize::<EmissionRate>(data)?;
    log::debug!("{} emission rates read", rates.len());
    Ok(EmissionRates::new(rates, correction_factor))
}

/// Loads the bundled `src/emission_rates.csv`.
/// # Error
/// Errors if the bundled table is malformed
pub fn load_emission_rates(correction_factor: f64) -> Result<EmissionRates, Error> {
    read_emission_rates(EMISSION_RATES, correction_factor)
}
