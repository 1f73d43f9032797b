#![forbid(unsafe_code)]
mod aggregate;
mod aircraft_types;
pub mod csv;
mod diagnostics;
mod error;
mod fleet;
mod flights;
mod footprint;
pub mod generator;

pub use aggregate::*;
pub use aircraft_types::*;
pub use diagnostics::*;
pub use error::*;
pub use fleet::*;
pub use flights::*;
pub use footprint::*;

/// Mean radius of the Earth in km used by [`distance`]
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geo-point in degrees, as found in flight records.
/// Either field may be missing in the input.
#[derive(Debug, Clone, Copy, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
pub struct Coordinates {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    /// Returns `(latitude, longitude)` when both are present and within
    /// `[-90, 90]` and `[-180, 180]` respectively.
    pub fn pos(&self) -> Option<(f64, f64)> {
        let latitude = self.latitude?;
        let longitude = self.longitude?;
        ((-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude))
            .then_some((latitude, longitude))
    }

    /// Returns the distance to another [`Coordinates`] in km, or `None` if
    /// either is invalid
    pub fn distance_to(&self, other: &Self) -> Option<f64> {
        Some(distance(self.pos()?, other.pos()?))
    }
}

/// Returns the great-circle distance between two geo-points `(latitude, longitude)`
/// in km, using the haversine formula.
pub fn distance(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lon1) = (from.0.to_radians(), from.1.to_radians());
    let (lat2, lon2) = (to.0.to_radians(), to.1.to_radians());

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // rounding may push `a` above 1 for antipodal points
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
