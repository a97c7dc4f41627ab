use crate::error::{Error, Result};
use crate::job::DataKind;

pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const ENSEMBLE_URL: &str = "https://ensemble-api.open-meteo.com/v1/ensemble";

/// Provenance label recorded in the fixture metadata.
pub fn source_label(kind: DataKind) -> &'static str {
    match kind {
        DataKind::Deterministic => "Open-Meteo API",
        DataKind::Ensemble => "Open-Meteo Ensemble API",
    }
}

pub fn is_http_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Endpoints must be http(s) URLs.
pub fn check_endpoint(endpoint: &str) -> Result<()> {
    if is_http_url(endpoint) {
        Ok(())
    } else {
        Err(Error::InvalidRequest(format!(
            "endpoint must be an http(s) url, got {endpoint:?}"
        )))
    }
}
