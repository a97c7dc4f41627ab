use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure or non-success HTTP status.
    #[error("request to {endpoint} failed: {message}")]
    Request {
        endpoint: String,
        status: Option<u16>,
        message: String,
    },

    /// Response body was not a JSON object.
    #[error("invalid response from {endpoint}: {message}")]
    Parse { endpoint: String, message: String },

    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP client could not be constructed.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid job: {0}")]
    InvalidJob(String),

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// HTTP status attached to a [`Error::Request`], if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Request { status, .. } => *status,
            _ => None,
        }
    }
}
