use reqwest::blocking::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::job::DataKind;
use crate::request::QueryParams;
use crate::sources::{ENSEMBLE_URL, FORECAST_URL};
use crate::url_builder::query_url;

/// Parsed forecast payload. Key order follows the upstream response.
pub type ForecastResponse = serde_json::Map<String, Value>;

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub forecast_url: String,
    pub ensemble_url: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            forecast_url: FORECAST_URL.to_string(),
            ensemble_url: ENSEMBLE_URL.to_string(),
        }
    }
}

/// Blocking forecast client. One attempt per call, no retries.
#[derive(Debug, Clone)]
pub struct Client {
    opts: ClientOptions,
    http: HttpClient,
}

impl Client {
    pub fn new(opts: ClientOptions) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("forecast-fixtures/", env!("CARGO_PKG_VERSION"))),
        );

        let http = HttpClient::builder().default_headers(headers).build()?;

        Ok(Self { opts, http })
    }

    pub fn default_client() -> Result<Self> {
        Self::new(ClientOptions::default())
    }

    pub fn endpoint(&self, kind: DataKind) -> &str {
        match kind {
            DataKind::Deterministic => &self.opts.forecast_url,
            DataKind::Ensemble => &self.opts.ensemble_url,
        }
    }

    /// GET the endpoint for `kind` and parse the body as a JSON object.
    pub fn fetch(&self, kind: DataKind, params: &QueryParams) -> Result<ForecastResponse> {
        let endpoint = self.endpoint(kind);
        let url = query_url(endpoint, params)?;
        debug!(%url, "requesting forecast");

        let request_error = |status: Option<u16>, message: String| Error::Request {
            endpoint: endpoint.to_string(),
            status,
            message,
        };

        let resp = self
            .http
            .get(url)
            .send()
            .map_err(|e| request_error(None, e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(request_error(Some(status.as_u16()), format!("http status {status}")));
        }

        let body = resp
            .bytes()
            .map_err(|e| request_error(Some(status.as_u16()), format!("reading body: {e}")))?;

        parse_body(endpoint, &body)
    }
}

fn parse_body(endpoint: &str, body: &[u8]) -> Result<ForecastResponse> {
    let parse_error = |message: String| Error::Parse {
        endpoint: endpoint.to_string(),
        message,
    };

    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(parse_error(format!(
            "expected a JSON object, got {}",
            json_type_name(&other)
        ))),
        Err(e) => Err(parse_error(e.to_string())),
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_body_accepts_object_in_order() {
        let map = parse_body("x", br#"{"latitude": 47.7, "hourly": {"time": []}, "elevation": 400}"#)
            .unwrap();
        let keys: Vec<&str> = map.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, ["latitude", "hourly", "elevation"]);
    }

    #[test]
    fn parse_body_rejects_malformed_and_non_objects() {
        assert!(matches!(parse_body("x", b"<html>oops"), Err(Error::Parse { .. })));
        assert!(matches!(parse_body("x", b"[1, 2]"), Err(Error::Parse { .. })));
        assert!(matches!(parse_body("x", b""), Err(Error::Parse { .. })));
    }

    #[test]
    fn builder_failures_stay_distinct_from_request_errors() {
        let e = HttpClient::new().get("no scheme here").build().unwrap_err();
        let err = Error::from(e);
        assert!(matches!(err, Error::Http(_)));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn endpoint_follows_kind() {
        let client = Client::new(ClientOptions {
            forecast_url: "http://localhost/forecast".into(),
            ensemble_url: "http://localhost/ensemble".into(),
        })
        .unwrap();
        assert_eq!(client.endpoint(DataKind::Deterministic), "http://localhost/forecast");
        assert_eq!(client.endpoint(DataKind::Ensemble), "http://localhost/ensemble");
    }

    #[test]
    fn connection_refused_is_request_error() {
        let client = Client::new(ClientOptions {
            forecast_url: "http://127.0.0.1:1/v1/forecast".into(),
            ensemble_url: "http://127.0.0.1:1/v1/ensemble".into(),
        })
        .unwrap();
        let loc = crate::job::Location::new(47.6952, 9.1307).unwrap();
        let params = crate::request::ParameterBuilder::default().build(loc, "icon_d2", DataKind::Ensemble);

        let err = client.fetch(DataKind::Ensemble, &params).unwrap_err();
        match err {
            Error::Request { endpoint, status, .. } => {
                assert_eq!(endpoint, "http://127.0.0.1:1/v1/ensemble");
                assert_eq!(status, None);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
