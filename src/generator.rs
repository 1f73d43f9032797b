//! Generates synthetic [`FlightRecord`]s between a fixed set of airports.
use rand::{seq::SliceRandom, Rng};

use crate::{Coordinates, Error, FlightRecord};

/// A named airport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Airport {
    /// IATA code (e.g. `JFK`)
    pub code: &'static str,
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

impl Airport {
    pub fn pos(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

macro_rules! airport {
    ($code:literal, $name:literal, $latitude:literal, $longitude:literal) => {
        Airport {
            code: $code,
            name: $name,
            latitude: $latitude,
            longitude: $longitude,
        }
    };
}

pub static AIRPORTS: [Airport; 12] = [
    airport!("JFK", "John F. Kennedy International Airport", 40.6413, -73.7781),
    airport!("LAX", "Los Angeles International Airport", 33.9416, -118.4085),
    airport!("ORD", "O'Hare International Airport", 41.9742, -87.9073),
    airport!("DFW", "Dallas/Fort Worth International Airport", 32.8998, -97.0403),
    airport!("DEN", "Denver International Airport", 39.8561, -104.6737),
    airport!("SFO", "San Francisco International Airport", 37.6213, -122.3790),
    airport!("SEA", "Seattle-Tacoma International Airport", 47.4502, -122.3088),
    airport!("MIA", "Miami International Airport", 25.7959, -80.2870),
    airport!("ATL", "Hartsfield-Jackson Atlanta International Airport", 33.6407, -84.4277),
    airport!("LAS", "Harry Reid International Airport", 36.0840, -115.1537),
    airport!("BOS", "Logan International Airport", 42.3656, -71.0096),
    airport!("PHX", "Phoenix Sky Harbor International Airport", 33.4342, -112.0116),
];

/// Tail numbers of the bundled fleet
pub static CALLSIGNS: [&str; 8] = [
    "N621MM", "N767CJ", "N713TS", "N444SC", "N54QW", "N4DP", "N162JC", "N350XX",
];

/// How flights are generated
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// number of flights
    pub flights: usize,
    /// the tail numbers to draw from
    pub callsigns: Vec<String>,
    /// a tail number and the probability of picking it before drawing uniformly
    pub bias: Option<(String, f64)>,
    /// probability of a synthetic tail number outside of `callsigns`
    pub unknown_ratio: f64,
    /// maximum great-circle distance between departure and arrival
    pub max_distance_km: Option<f64>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            flights: 500,
            callsigns: CALLSIGNS.iter().map(|c| c.to_string()).collect(),
            bias: Some(("N621MM".to_string(), 0.5)),
            unknown_ratio: 0.0,
            max_distance_km: Some(1000.0),
        }
    }
}

fn probability(name: &str, value: f64) -> Result<f64, Error> {
    (0.0..=1.0)
        .contains(&value)
        .then_some(value)
        .ok_or_else(|| Error::InvalidOption(format!("{name} must be within [0, 1], got {value}")))
}

/// Returns all (departure, arrival) pairs of [`AIRPORTS`] within `max_distance_km`,
/// including departure and arrival at the same airport.
pub fn airport_pairs(max_distance_km: Option<f64>) -> Vec<(&'static Airport, &'static Airport)> {
    AIRPORTS
        .iter()
        .flat_map(|from| AIRPORTS.iter().map(move |to| (from, to)))
        .filter(|(from, to)| {
            max_distance_km
                .map(|max| crate::distance(from.pos(), to.pos()) <= max)
                .unwrap_or(true)
        })
        .collect()
}

fn synthetic_callsign(rng: &mut impl Rng, callsigns: &[String]) -> String {
    loop {
        let letters = (0..2)
            .map(|_| rng.gen_range(b'A'..=b'Z') as char)
            .collect::<String>();
        let callsign = format!("N{}{letters}", rng.gen_range(100..10000));
        if !callsigns.contains(&callsign) {
            return callsign;
        }
    }
}

fn callsign(options: &Options, rng: &mut impl Rng) -> String {
    if rng.gen_bool(options.unknown_ratio) {
        return synthetic_callsign(rng, &options.callsigns);
    }
    if let Some((callsign, bias)) = &options.bias {
        if rng.gen_bool(*bias) {
            return callsign.clone();
        }
    }
    options
        .callsigns
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| synthetic_callsign(rng, &options.callsigns))
}

/// Generates `options.flights` [`FlightRecord`]s between [`AIRPORTS`].
///
/// Departure and arrival are drawn uniformly among the airport pairs within
/// `options.max_distance_km`, which is the same distribution as drawing both
/// uniformly and rejecting pairs that are too far apart.
/// # Error
/// Errors if any of the probabilities is outside `[0, 1]` or the maximum distance is negative
pub fn generate(options: &Options, rng: &mut impl Rng) -> Result<Vec<FlightRecord>, Error> {
    probability("unknown ratio", options.unknown_ratio)?;
    if let Some((_, bias)) = &options.bias {
        probability("bias", *bias)?;
    }
    let pairs = airport_pairs(options.max_distance_km);
    if pairs.is_empty() {
        return Err(Error::InvalidOption(format!(
            "no airports are within {:?} km",
            options.max_distance_km
        )));
    }
    log::debug!("{} airport pairs to draw from", pairs.len());

    Ok((0..options.flights)
        .map(|_| {
            let (from, to) = pairs[rng.gen_range(0..pairs.len())];
            FlightRecord {
                tail_number: callsign(options, rng),
                departure_coords: Some(from.coordinates()),
                arrival_coords: Some(to.coordinates()),
                departure_airport: Some(from.code.to_string()),
                arrival_airport: Some(to.code.to_string()),
            }
        })
        .collect())
}
