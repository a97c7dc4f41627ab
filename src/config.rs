use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::client::ClientOptions;
use crate::error::{Error, Result};
use crate::job::{Job, Location};
use crate::request::{DEFAULT_TIMEZONE, ParameterBuilder};
use crate::sources::{ENSEMBLE_URL, FORECAST_URL, check_endpoint};

const KONSTANZ: Location = Location::known(47.6952, 9.1307);
const ZURICH: Location = Location::known(47.3769, 8.5417);
const ESPOO: Location = Location::known(60.205490, 24.655899);

/// Everything one batch run needs: endpoints, timezone and the jobs to run.
///
/// Example TOML:
/// ```toml
/// timezone = "Europe/Berlin"
///
/// [[jobs]]
/// location = { lat = 47.6952, lon = 9.1307 }
/// model = "icon_d2"
/// kind = "deterministic"
/// output = "fixtures/konstanz_weather.json"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureConfig {
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
    #[serde(default = "default_ensemble_url")]
    pub ensemble_url: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    pub jobs: Vec<Job>,
}

fn default_forecast_url() -> String {
    FORECAST_URL.to_string()
}

fn default_ensemble_url() -> String {
    ENSEMBLE_URL.to_string()
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            forecast_url: default_forecast_url(),
            ensemble_url: default_ensemble_url(),
            timezone: default_timezone(),
            jobs: default_jobs(),
        }
    }
}

/// The fixtures shipped with the project.
pub fn default_jobs() -> Vec<Job> {
    vec![
        Job::deterministic(KONSTANZ, "icon_d2", "fixtures/konstanz_weather.json"),
        Job::deterministic(ZURICH, "meteoswiss_icon_ch1", "fixtures/zurich_weather.json"),
        Job::deterministic(ESPOO, "icon_d2", "fixtures/espoo_weather.json"),
        Job::ensemble(KONSTANZ, "icon_d2", "fixtures/konstanz_ensemble.json"),
    ]
}

impl FixtureConfig {
    pub fn with_jobs(jobs: Vec<Job>) -> Self {
        Self {
            jobs,
            ..Self::default()
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml(&contents).map_err(|e| match e {
            Error::Config { message, .. } => Error::Config {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: FixtureConfig = toml::from_str(contents).map_err(|e| Error::Config {
            path: Default::default(),
            message: e.message().to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        check_endpoint(&self.forecast_url)?;
        check_endpoint(&self.ensemble_url)?;
        if self.timezone.trim().is_empty() {
            return Err(Error::Config {
                path: Default::default(),
                message: "timezone must not be empty".into(),
            });
        }
        Ok(())
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            forecast_url: self.forecast_url.clone(),
            ensemble_url: self.ensemble_url.clone(),
        }
    }

    pub fn parameter_builder(&self) -> ParameterBuilder {
        ParameterBuilder::new(self.timezone.clone())
    }
}
