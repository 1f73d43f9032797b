use std::path::Path;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::{Coordinates, Error};

/// A flight between two geo-points, as produced by a flight tracker or by
/// [`crate::generator`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlightRecord {
    /// The tail number of the aircraft (e.g. `N621MM`)
    #[serde(rename = "callsign", default)]
    pub tail_number: String,
    #[serde(default)]
    pub departure_coords: Option<Coordinates>,
    #[serde(default)]
    pub arrival_coords: Option<Coordinates>,
    /// Code of the departure airport, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_airport: Option<String>,
    /// Code of the arrival airport, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_airport: Option<String>,
}

impl FlightRecord {
    /// Flight geo distance in km, `None` when any of the coordinates is missing or invalid
    pub fn distance(&self) -> Option<f64> {
        self.departure_coords
            .as_ref()?
            .distance_to(self.arrival_coords.as_ref()?)
    }

    /// Reads the fields of `record` one by one, leaving out those of the wrong type.
    /// A record without a readable `callsign` gets an empty tail number.
    fn from_fields(record: &Value) -> Self {
        Self {
            tail_number: field(record, "callsign").unwrap_or_default(),
            departure_coords: field(record, "departureCoords"),
            arrival_coords: field(record, "arrivalCoords"),
            departure_airport: field(record, "departureAirport"),
            arrival_airport: field(record, "arrivalAirport"),
        }
    }
}

fn field<D: DeserializeOwned>(record: &Value, name: &str) -> Option<D> {
    D::deserialize(record.get(name)?).ok()
}

/// Parses a JSON array of [`FlightRecord`].
///
/// Elements are read independently: an element with fields of the wrong type keeps
/// the fields that could be read, so that it surfaces as a diagnostic on aggregation
/// instead of failing the whole array.
/// # Error
/// Errors if `data` is not a JSON array
pub fn read_flights(data: &[u8]) -> Result<Vec<FlightRecord>, Error> {
    let records: Vec<Value> = serde_json::from_slice(data)?;
    Ok(records
        .iter()
        .enumerate()
        .map(|(flight, record)| {
            FlightRecord::deserialize(record).unwrap_or_else(|e| {
                log::warn!("flight #{flight}: {e}; keeping the fields that could be read");
                FlightRecord::from_fields(record)
            })
        })
        .collect())
}

/// Loads a JSON array of [`FlightRecord`] from disk.
/// # Error
/// Errors if the file cannot be read or parsed
pub fn load_flights(path: impl AsRef<Path>) -> Result<Vec<FlightRecord>, Error> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(Error::io(path))?;
    let flights = read_flights(&data)?;
    log::info!("{} flights read from {}", flights.len(), path.display());
    Ok(flights)
}

/// Writes `flights` to disk as a pretty-printed JSON array.
/// # Error
/// Errors if the file cannot be written
pub fn write_flights(path: impl AsRef<Path>, flights: &[FlightRecord]) -> Result<(), Error> {
    let path = path.as_ref();
    let data = serde_json::to_vec_pretty(flights)?;
    std::fs::write(path, data).map_err(Error::io(path))?;
    log::info!("{} flights written to {}", flights.len(), path.display());
    Ok(())
}
