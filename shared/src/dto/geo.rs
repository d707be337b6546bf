//! # Geographic Types

use serde::{Deserialize, Serialize};

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Fixed point used whenever live location is unavailable (Bhopal, Madhya Pradesh).
    pub const FALLBACK: Coordinates = Coordinates {
        lat: 23.2599,
        lon: 77.4126,
    };

    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// True when both components are finite and inside the valid ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Where a resolved position came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationSource {
    /// Device or network lookup succeeded
    Live,
    /// Lookup denied, disabled or timed out; [`Coordinates::FALLBACK`] in use
    Fallback,
}

/// A position together with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub coords: Coordinates,
    pub source: LocationSource,
}

impl ResolvedLocation {
    pub fn live(coords: Coordinates) -> Self {
        Self { coords, source: LocationSource::Live }
    }

    pub fn fallback() -> Self {
        Self {
            coords: Coordinates::FALLBACK,
            source: LocationSource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == LocationSource::Fallback
    }
}
