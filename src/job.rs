use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLocation")]
pub struct Location {
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct RawLocation {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawLocation> for Location {
    type Error = Error;

    fn try_from(raw: RawLocation) -> Result<Self> {
        Location::new(raw.lat, raw.lon)
    }
}

impl Location {
    /// Latitude must lie in [-90, 90] and longitude in [-180, 180].
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(Error::InvalidJob(format!("latitude out of range: {lat}")));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(Error::InvalidJob(format!("longitude out of range: {lon}")));
        }
        Ok(Self { lat, lon })
    }

    /// For compile-time coordinates already known to be in range.
    pub(crate) const fn known(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lon)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataKind {
    Deterministic,
    Ensemble,
}

impl DataKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataKind::Deterministic => "deterministic",
            DataKind::Ensemble => "ensemble",
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fixture file to produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub location: Location,
    pub model: String,
    pub kind: DataKind,
    pub output: PathBuf,
}

impl Job {
    pub fn new(
        location: Location,
        model: impl Into<String>,
        kind: DataKind,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            location,
            model: model.into(),
            kind,
            output: output.into(),
        }
    }

    pub fn deterministic(location: Location, model: impl Into<String>, output: impl Into<PathBuf>) -> Self {
        Self::new(location, model, DataKind::Deterministic, output)
    }

    pub fn ensemble(location: Location, model: impl Into<String>, output: impl Into<PathBuf>) -> Self {
        Self::new(location, model, DataKind::Ensemble, output)
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}
