use crate::job::{DataKind, Location};

pub const DEFAULT_TIMEZONE: &str = "Europe/Berlin";

/// Hourly variables requested from the deterministic forecast endpoint.
pub const DETERMINISTIC_HOURLY: [&str; 17] = [
    "temperature_2m",
    "relative_humidity_2m",
    "dew_point_2m",
    "precipitation",
    "precipitation_probability",
    "weather_code",
    "cloud_cover",
    "cloud_cover_low",
    "cloud_cover_mid",
    "cloud_cover_high",
    "visibility",
    "sunshine_duration",
    "uv_index",
    "uv_index_clear_sky",
    "wind_speed_10m",
    "wind_direction_10m",
    "wind_gusts_10m",
];

pub const DETERMINISTIC_DAILY: [&str; 2] = ["sunrise", "sunset"];

/// Hourly variables requested from the ensemble endpoint.
///
/// Ensemble members carry no dew point, cloud layers, visibility or sunshine
/// duration, and the endpoint has no daily block.
pub const ENSEMBLE_HOURLY: [&str; 10] = [
    "temperature_2m",
    "relative_humidity_2m",
    "precipitation",
    "cloud_cover",
    "weather_code",
    "uv_index",
    "uv_index_clear_sky",
    "wind_speed_10m",
    "wind_direction_10m",
    "wind_gusts_10m",
];

/// Query parameters for one forecast request.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParams {
    pub latitude: f64,
    pub longitude: f64,
    pub hourly: Vec<&'static str>,
    pub daily: Option<Vec<&'static str>>,
    pub timezone: String,
    pub models: String,
}

impl QueryParams {
    /// Key/value pairs in request order. Lists are comma-joined.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("latitude", self.latitude.to_string()),
            ("longitude", self.longitude.to_string()),
            ("hourly", self.hourly.join(",")),
        ];
        if let Some(daily) = &self.daily {
            pairs.push(("daily", daily.join(",")));
        }
        pairs.push(("timezone", self.timezone.clone()));
        pairs.push(("models", self.models.clone()));
        pairs
    }
}

/// Maps (location, model, kind) to a complete parameter set.
///
/// All requests share one timezone so hourly timestamps line up across fixtures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterBuilder {
    timezone: String,
}

impl Default for ParameterBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEZONE)
    }
}

impl ParameterBuilder {
    pub fn new(timezone: impl Into<String>) -> Self {
        Self {
            timezone: timezone.into(),
        }
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    pub fn build(&self, location: Location, model: &str, kind: DataKind) -> QueryParams {
        let (hourly, daily) = match kind {
            DataKind::Deterministic => (
                DETERMINISTIC_HOURLY.to_vec(),
                Some(DETERMINISTIC_DAILY.to_vec()),
            ),
            DataKind::Ensemble => (ENSEMBLE_HOURLY.to_vec(), None),
        };

        QueryParams {
            latitude: location.lat(),
            longitude: location.lon(),
            hourly,
            daily,
            timezone: self.timezone.clone(),
            models: model.to_string(),
        }
    }
}
