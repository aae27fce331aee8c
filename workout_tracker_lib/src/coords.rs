use serde::{Deserialize, Serialize};

use crate::workout::WorkoutError;

/// A latitude/longitude pair as delivered by a map click or the geolocation provider.
///
/// Serialized as a `[lat, lng]` array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Result<Self, WorkoutError> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);

        if !valid {
            return Err(WorkoutError::InvalidCoords { lat, lng });
        }

        Ok(Self { lat, lng })
    }
}

impl From<(f64, f64)> for Coords {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

impl From<Coords> for (f64, f64) {
    fn from(coords: Coords) -> Self {
        (coords.lat, coords.lng)
    }
}

impl std::fmt::Display for Coords {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.lat, self.lng)
    }
}
