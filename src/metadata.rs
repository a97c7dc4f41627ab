use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::client::ForecastResponse;
use crate::job::{DataKind, Job};
use crate::sources::source_label;

/// Top-level key holding the provenance block. Open-Meteo never emits it.
pub const METADATA_KEY: &str = "_metadata";

/// Forecast response plus its [`METADATA_KEY`] block.
pub type Fixture = serde_json::Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataLocation {
    pub lat: f64,
    pub lon: f64,
}

/// Provenance recorded alongside each fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub generated_at: String,
    pub source: String,
    pub location: MetadataLocation,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Metadata {
    pub fn for_job(job: &Job, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            source: source_label(job.kind).to_string(),
            location: MetadataLocation {
                lat: job.location.lat(),
                lon: job.location.lon(),
            },
            model: job.model.clone(),
            kind: match job.kind {
                DataKind::Ensemble => Some(DataKind::Ensemble.as_str().to_string()),
                DataKind::Deterministic => None,
            },
        }
    }

    pub fn to_value(&self) -> Value {
        let mut v = json!({
            "generated_at": self.generated_at,
            "source": self.source,
            "location": { "lat": self.location.lat, "lon": self.location.lon },
            "model": self.model,
        });
        if let (Some(kind), Value::Object(map)) = (&self.kind, &mut v) {
            map.insert("kind".to_string(), Value::String(kind.clone()));
        }
        v
    }
}

/// Copy `response` and append the metadata block for `job`.
///
/// A pre-existing [`METADATA_KEY`] entry is replaced so the fixture carries exactly one.
pub fn enrich(response: &ForecastResponse, job: &Job, generated_at: DateTime<Utc>) -> Fixture {
    let mut fixture = response.clone();
    fixture.shift_remove(METADATA_KEY);
    fixture.insert(
        METADATA_KEY.to_string(),
        Metadata::for_job(job, generated_at).to_value(),
    );
    fixture
}
