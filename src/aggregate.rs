use serde::Serialize;

use crate::{
    footprint, AircraftType, Diagnostic, EmissionRates, Fleet, FlightRecord, FootprintError,
};

/// The emissions attributed to an entity
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EntityTotal {
    pub entity: String,
    pub aircraft_type: AircraftType,
    /// number of flights attributed
    pub flights: usize,
    pub distance_km: f64,
    pub emissions_kg: f64,
}

/// The result of [`Aggregator::aggregate`]
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct Report {
    /// One total per entity, in the enumeration order of the [`Fleet`]
    pub totals: Vec<EntityTotal>,
    pub diagnostics: Vec<Diagnostic>,
    /// number of flights attributed to an entity
    pub processed: usize,
    /// number of flights left out of the totals
    pub skipped: usize,
}

impl Report {
    /// Returns the kg of CO2 attributed to `entity`, if it is known
    pub fn total(&self, entity: &str) -> Option<f64> {
        self.totals
            .iter()
            .find(|t| t.entity == entity)
            .map(|t| t.emissions_kg)
    }

    pub fn total_emissions_kg(&self) -> f64 {
        self.totals.iter().map(|t| t.emissions_kg).sum()
    }
}

/// A flight resolved to its entity
struct Attribution {
    entity: usize,
    distance_km: f64,
    emissions_kg: f64,
}

fn raise(diagnostics: &mut Vec<Diagnostic>, diagnostic: Diagnostic) {
    log::warn!("{diagnostic}");
    diagnostics.push(diagnostic);
}

/// Attributes the emissions of flights to the entities of a [`Fleet`].
#[derive(Debug, Clone)]
pub struct Aggregator {
    fleet: Fleet,
    rates: EmissionRates,
    cruise_speed_kmh: f64,
}

impl Aggregator {
    pub fn new(fleet: Fleet, rates: EmissionRates, cruise_speed_kmh: f64) -> Self {
        Self {
            fleet,
            rates,
            cruise_speed_kmh,
        }
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn rates(&self) -> &EmissionRates {
        &self.rates
    }

    /// Folds `flights`, in order, into a [`Report`] with the total emissions per entity.
    /// Malformed flights are skipped (or taken as 0 km, for invalid coordinates)
    /// and reported in [`Report::diagnostics`].
    pub fn aggregate<'a>(&self, flights: impl IntoIterator<Item = &'a FlightRecord>) -> Report {
        let mut report = Report {
            totals: self
                .fleet
                .entities()
                .iter()
                .map(|a| EntityTotal {
                    entity: a.entity.clone(),
                    aircraft_type: a.aircraft_type.clone(),
                    flights: 0,
                    distance_km: 0.0,
                    emissions_kg: 0.0,
                })
                .collect(),
            diagnostics: self.fleet.conflicts().to_vec(),
            processed: 0,
            skipped: 0,
        };

        for (flight, record) in flights.into_iter().enumerate() {
            match self.attribute(flight, record, &mut report.diagnostics) {
                Some(attribution) => {
                    let total = &mut report.totals[attribution.entity];
                    total.flights += 1;
                    total.distance_km += attribution.distance_km;
                    total.emissions_kg += attribution.emissions_kg;
                    report.processed += 1;
                    log::debug!(
                        "{} emissions for this flight: {:.2} kg CO2e",
                        total.entity,
                        attribution.emissions_kg
                    );
                }
                None => report.skipped += 1,
            }
        }
        log::info!(
            "{} flights attributed, {} skipped",
            report.processed,
            report.skipped
        );
        report
    }

    fn attribute(
        &self,
        flight: usize,
        record: &FlightRecord,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<Attribution> {
        let tail_number = &record.tail_number;
        log::debug!("Processing flight #{flight} with tail number {tail_number}");

        let Some(aircraft_type) = self.fleet.aircraft_type(tail_number) else {
            raise(
                diagnostics,
                Diagnostic::MissingAircraftMapping {
                    flight,
                    tail_number: tail_number.clone(),
                },
            );
            return None;
        };

        let distance_km = record.distance().unwrap_or_else(|| {
            raise(
                diagnostics,
                Diagnostic::InvalidCoordinates {
                    flight,
                    tail_number: tail_number.clone(),
                },
            );
            0.0
        });
        log::debug!("Distance calculated: {distance_km:.2} km");

        let Some(entity) = self.fleet.operator(aircraft_type) else {
            raise(
                diagnostics,
                Diagnostic::MissingEntityMapping {
                    flight,
                    tail_number: tail_number.clone(),
                    aircraft_type: aircraft_type.clone(),
                },
            );
            return None;
        };

        match footprint(aircraft_type, distance_km, &self.rates, self.cruise_speed_kmh) {
            Ok(emissions_kg) => Some(Attribution {
                entity,
                distance_km,
                emissions_kg,
            }),
            Err(FootprintError::UnknownAircraftType(aircraft_type)) => {
                raise(
                    diagnostics,
                    Diagnostic::MissingEmissionRate {
                        flight,
                        aircraft_type,
                    },
                );
                None
            }
            Err(FootprintError::Invalid { value }) => {
                raise(
                    diagnostics,
                    Diagnostic::InvalidFootprint {
                        flight,
                        aircraft_type: aircraft_type.clone(),
                        value,
                    },
                );
                None
            }
        }
    }
}
