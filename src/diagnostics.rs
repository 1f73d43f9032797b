use serde::Serialize;
use thiserror::Error;

use crate::AircraftType;

/// A problem with a single flight record (or with the tables) that was recovered
/// from. Diagnostics never alter accumulated totals.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind")]
pub enum Diagnostic {
    #[error("flight #{flight}: no aircraft type found for tail number {tail_number:?}; skipped")]
    MissingAircraftMapping { flight: usize, tail_number: String },

    #[error("flight #{flight}: no entity operates aircraft type {aircraft_type} ({tail_number}); skipped")]
    MissingEntityMapping {
        flight: usize,
        tail_number: String,
        aircraft_type: AircraftType,
    },

    #[error("flight #{flight}: invalid coordinates for {tail_number}; distance taken as 0 km")]
    InvalidCoordinates { flight: usize, tail_number: String },

    #[error("flight #{flight}: no emission rate for aircraft type {aircraft_type}; skipped")]
    MissingEmissionRate {
        flight: usize,
        aircraft_type: AircraftType,
    },

    #[error("flight #{flight}: invalid footprint of {value} kg CO2 for aircraft type {aircraft_type}; skipped")]
    InvalidFootprint {
        flight: usize,
        aircraft_type: AircraftType,
        value: f64,
    },

    #[error("aircraft type {aircraft_type} is assigned to both {entity} and {shadowed}; its flights are attributed to {entity}")]
    AmbiguousAssignment {
        aircraft_type: AircraftType,
        entity: String,
        shadowed: String,
    },
}

impl Diagnostic {
    /// The index of the flight record this diagnostic refers to, if any
    pub fn flight(&self) -> Option<usize> {
        match self {
            Self::MissingAircraftMapping { flight, .. }
            | Self::MissingEntityMapping { flight, .. }
            | Self::InvalidCoordinates { flight, .. }
            | Self::MissingEmissionRate { flight, .. }
            | Self::InvalidFootprint { flight, .. } => Some(*flight),
            Self::AmbiguousAssignment { .. } => None,
        }
    }

    /// Whether the flight this diagnostic refers to was left out of the totals
    pub fn skips_flight(&self) -> bool {
        !matches!(
            self,
            Self::InvalidCoordinates { .. } | Self::AmbiguousAssignment { .. }
        )
    }
}
