use std::path::PathBuf;

use gcp_bigquery_client::error::BQError;
use thiserror::Error;

/// Errors raised while preparing or submitting an export job.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The service account key file is unreadable or not a key document.
    #[error("service account key {path:?} is unreadable or malformed: {source}")]
    Credential {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The BigQuery service handle could not be constructed.
    #[error("could not build BigQuery service handle: {0}")]
    Connect(#[source] BQError),

    /// The extract job was rejected, or never reached the service.
    #[error("extract job submission failed: {0}")]
    Submit(#[source] BQError),

    /// The job request document could not be serialized.
    #[error("could not encode job request: {0}")]
    Encode(#[from] serde_json::Error),

    /// `export` was called on a client that never connected.
    #[error("client is not connected, call connect first")]
    NotConnected,
}

pub type Result<T> = std::result::Result<T, ExportError>;
