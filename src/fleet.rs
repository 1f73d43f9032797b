use std::collections::{hash_map::Entry, HashMap};

use serde::{Deserialize, Serialize};

use crate::{AircraftType, Diagnostic, Error};

pub static TAIL_NUMBERS: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/src/tail_numbers.csv"
));
pub static ENTITIES: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/src/entities.csv"
));

/// The in-memory representation of an aircraft registration
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Registration {
    /// The tail number of the aircraft (e.g. `N621MM`)
    pub tail_number: String,
    pub aircraft_type: AircraftType,
}

/// The in-memory representation of the aircraft type an entity is accountable for
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Assignment {
    /// The accountable party (e.g. `TAYLOR_SWIFT`)
    pub entity: String,
    pub aircraft_type: AircraftType,
}

/// Normalizes a tail number so that `n-621mm ` and `N621MM` are the same aircraft
pub fn normalize_tail_number(tail_number: &str) -> String {
    tail_number.trim().to_ascii_uppercase().replace('-', "")
}

/// The identity-resolution tables: tail number -> [`AircraftType`] -> entity.
///
/// The inverse mapping aircraft type -> entity is computed once on construction.
/// When two entities are assigned the same aircraft type, the first in enumeration
/// order operates it and the other is recorded in [`Fleet::conflicts`].
#[derive(Debug, Clone, Default)]
pub struct Fleet {
    aircraft_types: HashMap<String, AircraftType>,
    entities: Vec<Assignment>,
    operators: HashMap<AircraftType, usize>,
    conflicts: Vec<Diagnostic>,
}

impl Fleet {
    pub fn new(
        registrations: impl IntoIterator<Item = Registration>,
        entities: impl IntoIterator<Item = Assignment>,
    ) -> Self {
        let mut aircraft_types = HashMap::<String, AircraftType>::new();
        for registration in registrations {
            let tail_number = normalize_tail_number(&registration.tail_number);
            if tail_number.is_empty() {
                log::warn!(
                    "registration of {} without a tail number ignored",
                    registration.aircraft_type
                );
                continue;
            }
            match aircraft_types.entry(tail_number) {
                Entry::Vacant(entry) => {
                    entry.insert(registration.aircraft_type);
                }
                Entry::Occupied(entry) => {
                    log::warn!(
                        "tail number {} registered more than once; keeping {}",
                        entry.key(),
                        entry.get()
                    );
                }
            }
        }

        let entities = entities.into_iter().collect::<Vec<_>>();
        let mut operators = HashMap::<AircraftType, usize>::new();
        let mut conflicts = vec![];
        for (index, assignment) in entities.iter().enumerate() {
            match operators.entry(assignment.aircraft_type.clone()) {
                Entry::Vacant(entry) => {
                    entry.insert(index);
                }
                Entry::Occupied(entry) => {
                    let conflict = Diagnostic::AmbiguousAssignment {
                        aircraft_type: assignment.aircraft_type.clone(),
                        entity: entities[*entry.get()].entity.clone(),
                        shadowed: assignment.entity.clone(),
                    };
                    log::warn!("{conflict}");
                    conflicts.push(conflict);
                }
            }
        }

        Self {
            aircraft_types,
            entities,
            operators,
            conflicts,
        }
    }

    /// Returns the [`AircraftType`] registered under `tail_number`
    pub fn aircraft_type(&self, tail_number: &str) -> Option<&AircraftType> {
        self.aircraft_types.get(&normalize_tail_number(tail_number))
    }

    /// Returns the index in [`Fleet::entities`] of the entity operating `aircraft_type`
    pub fn operator(&self, aircraft_type: &AircraftType) -> Option<usize> {
        self.operators.get(aircraft_type).copied()
    }

    /// All entities, in enumeration order
    pub fn entities(&self) -> &[Assignment] {
        &self.entities
    }

    /// Assignments that were shadowed by an earlier entity with the same aircraft type
    pub fn conflicts(&self) -> &[Diagnostic] {
        &self.conflicts
    }
}

/// Reads a [`Fleet`] from two CSVs with columns `tail_number,aircraft_type` and
/// `entity,aircraft_type`.
/// # Error
/// Errors if any of the CSVs is malformed
pub fn read_fleet(tail_numbers: &[u8], entities: &[u8]) -> Result<Fleet, Error> {
    let registrations = crate::csv::deserialize::<Registration>(tail_numbers)?;
    let entities = crate::csv::deserialize::<Assignment>(entities)?;
    log::debug!(
        "{} registrations and {} entities read",
        registrations.len(),
        entities.len()
    );
    Ok(Fleet::new(registrations, entities))
}

/// Loads the bundled `src/tail_numbers.csv` and `src/entities.csv`.
/// # Error
/// Errors if the bundled tables are malformed
pub fn load_fleet() -> Result<Fleet, Error> {
    read_fleet(TAIL_NUMBERS, ENTITIES)
}
