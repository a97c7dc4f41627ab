#![forbid(unsafe_code)]

//! Forecast fixture generator for the Open-Meteo API.
//!
//! Each [`Job`] names a point, a model, a [`DataKind`] (deterministic or ensemble)
//! and an output file. The [`Driver`] builds the query parameters, fetches the
//! forecast with a blocking HTTP client, appends a `_metadata` provenance block
//! and writes the result as pretty-printed JSON.
//!
//! **Quick start**
//! ```no_run
//! use forecast_fixtures::{DataKind, Driver, FixtureConfig, Job, Location};
//!
//! let konstanz = Location::new(47.6952, 9.1307)?;
//! let cfg = FixtureConfig::with_jobs(vec![
//!     Job::new(konstanz, "icon_d2", DataKind::Deterministic, "fixtures/konstanz_weather.json"),
//!     Job::new(konstanz, "icon_d2", DataKind::Ensemble, "fixtures/konstanz_ensemble.json"),
//! ]);
//!
//! let report = Driver::from_config(&cfg)?.run(&cfg.jobs);
//! println!("{} of {} fixtures written", report.succeeded(), report.total());
//! # Ok::<(), forecast_fixtures::Error>(())
//! ```
//!
//! Notes:
//! - Jobs run sequentially, one request each, no retries.
//! - The output directory must exist; it is never created.

mod client;
mod config;
mod driver;
mod error;
mod job;
mod metadata;
mod request;
mod sources;
mod url_builder;
mod writer;

pub use client::{Client, ClientOptions, ForecastResponse};
pub use config::{FixtureConfig, default_jobs};
pub use driver::{BatchReport, Driver, FixtureSummary, JobOutcome};
pub use error::{Error, Result};
pub use job::{DataKind, Job, Location};
pub use metadata::{Fixture, METADATA_KEY, Metadata, MetadataLocation, enrich};
pub use request::{
    DEFAULT_TIMEZONE, DETERMINISTIC_DAILY, DETERMINISTIC_HOURLY, ENSEMBLE_HOURLY, ParameterBuilder,
    QueryParams,
};
pub use sources::{ENSEMBLE_URL, FORECAST_URL, source_label};
pub use url_builder::query_url;
pub use writer::write_fixture;
