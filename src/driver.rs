use std::path::PathBuf;

use chrono::Utc;
use serde_json::Value;
use tracing::{error, info};

use crate::client::{Client, ForecastResponse};
use crate::config::FixtureConfig;
use crate::error::{Error, Result};
use crate::job::Job;
use crate::metadata::enrich;
use crate::request::ParameterBuilder;
use crate::writer::write_fixture;

/// What a successful job produced.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureSummary {
    pub path: PathBuf,
    pub hourly_points: usize,
    /// Min and max of the numeric `hourly.temperature_2m` values, if any.
    pub temperature_range: Option<(f64, f64)>,
}

impl FixtureSummary {
    fn from_response(path: PathBuf, response: &ForecastResponse) -> Self {
        let hourly = response.get("hourly");
        let hourly_points = hourly
            .and_then(|h| h.get("time"))
            .and_then(Value::as_array)
            .map_or(0, Vec::len);

        let temperature_range = hourly
            .and_then(|h| h.get("temperature_2m"))
            .and_then(Value::as_array)
            .and_then(|temps| {
                temps.iter().filter_map(Value::as_f64).fold(None, |acc: Option<(f64, f64)>, t| match acc {
                    None => Some((t, t)),
                    Some((lo, hi)) => Some((f64::min(lo, t), f64::max(hi, t))),
                })
            });

        Self {
            path,
            hourly_points,
            temperature_range,
        }
    }
}

#[derive(Debug)]
pub struct JobOutcome {
    pub job: Job,
    pub result: Result<FixtureSummary>,
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-job results of one batch, in job order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<JobOutcome>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = (&Job, &Error)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.job, e)))
    }
}

/// Runs jobs one after another; a failed job never stops the batch.
#[derive(Debug, Clone)]
pub struct Driver {
    client: Client,
    params: ParameterBuilder,
}

impl Driver {
    pub fn new(client: Client, params: ParameterBuilder) -> Self {
        Self { client, params }
    }

    pub fn from_config(cfg: &FixtureConfig) -> Result<Self> {
        Ok(Self::new(Client::new(cfg.client_options())?, cfg.parameter_builder()))
    }

    pub fn run(&self, jobs: &[Job]) -> BatchReport {
        let mut report = BatchReport::default();

        for job in jobs {
            let result = self.run_job(job);
            match &result {
                Ok(summary) => match summary.temperature_range {
                    Some((lo, hi)) => info!(
                        path = %summary.path.display(),
                        points = summary.hourly_points,
                        "saved fixture, temperature range {lo}°C to {hi}°C"
                    ),
                    None => info!(
                        path = %summary.path.display(),
                        points = summary.hourly_points,
                        "saved fixture, no temperature_2m series"
                    ),
                },
                Err(e) => error!(
                    model = %job.model,
                    kind = %job.kind,
                    path = %job.output.display(),
                    "fixture failed: {e}"
                ),
            }
            report.outcomes.push(JobOutcome {
                job: job.clone(),
                result,
            });
        }

        info!(
            total = report.total(),
            succeeded = report.succeeded(),
            failed = report.failed(),
            "batch complete"
        );
        report
    }

    /// Build parameters, fetch, enrich and write a single fixture.
    pub fn run_job(&self, job: &Job) -> Result<FixtureSummary> {
        info!(
            lat = job.location.lat(),
            lon = job.location.lon(),
            model = %job.model,
            kind = %job.kind,
            "fetching forecast"
        );

        let params = self.params.build(job.location, &job.model, job.kind);
        let response = self.client.fetch(job.kind, &params)?;
        let fixture = enrich(&response, job, Utc::now());
        write_fixture(&fixture, &job.output)?;

        Ok(FixtureSummary::from_response(job.output.clone(), &response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientOptions;
    use crate::job::Location;
    use serde_json::json;

    fn response(v: Value) -> ForecastResponse {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn summary_counts_points_and_temperature_range() {
        let r = response(json!({
            "hourly": {
                "time": ["t0", "t1", "t2"],
                "temperature_2m": [5.0, null, -1.5, 7.25]
            }
        }));
        let s = FixtureSummary::from_response("a.json".into(), &r);
        assert_eq!(s.hourly_points, 3);
        assert_eq!(s.temperature_range, Some((-1.5, 7.25)));
    }

    #[test]
    fn summary_tolerates_missing_series() {
        let s = FixtureSummary::from_response("a.json".into(), &response(json!({"daily": {}})));
        assert_eq!(s.hourly_points, 0);
        assert_eq!(s.temperature_range, None);

        let s = FixtureSummary::from_response(
            "a.json".into(),
            &response(json!({"hourly": {"time": ["t0"], "temperature_2m_member01": [3.0]}})),
        );
        assert_eq!(s.hourly_points, 1);
        assert_eq!(s.temperature_range, None);
    }

    #[test]
    fn unreachable_endpoint_fails_every_job_without_aborting() {
        let client = Client::new(ClientOptions {
            forecast_url: "http://127.0.0.1:1/v1/forecast".into(),
            ensemble_url: "http://127.0.0.1:1/v1/ensemble".into(),
        })
        .unwrap();
        let driver = Driver::new(client, ParameterBuilder::default());
        let dir = tempfile::tempdir().unwrap();
        let loc = Location::new(47.6952, 9.1307).unwrap();
        let jobs = vec![
            Job::deterministic(loc, "icon_d2", dir.path().join("a.json")),
            Job::ensemble(loc, "icon_d2", dir.path().join("b.json")),
        ];

        let report = driver.run(&jobs);
        assert_eq!(report.total(), 2);
        assert_eq!(report.failed(), 2);
        assert!(!report.all_succeeded());
        for (job, err) in report.failures() {
            assert!(matches!(err, Error::Request { status: None, .. }));
            assert!(!job.output.exists());
        }
    }

    #[test]
    fn empty_batch_is_success() {
        let driver = Driver::from_config(&FixtureConfig::with_jobs(vec![])).unwrap();
        let report = driver.run(&[]);
        assert_eq!(report.total(), 0);
        assert!(report.all_succeeded());
    }
}
