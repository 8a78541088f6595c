pub mod client;
pub mod error;

#[cfg(test)]
mod test_utils;

pub use client::{ExportClient, TableLocation};
pub use error::{ExportError, Result};

use clap::Parser;

/// Export a BigQuery table to Cloud Storage as a one-shot extract job.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Opts {
    /// Project owning the source table.
    #[arg(long = "project_id", default_value = "")]
    pub project_id: String,
    /// Dataset containing the source table.
    #[arg(long = "dataset_id", default_value = "")]
    pub dataset_id: String,
    /// Table to export.
    #[arg(long = "table_id", default_value = "")]
    pub table_id: String,
    /// Destination URI, e.g. gs://bucket/path.
    #[arg(long = "cloud_storage_path", default_value = "")]
    pub cloud_storage_path: String,
    /// Output format, e.g. CSV or NEWLINE_DELIMITED_JSON.
    #[arg(long = "format", default_value = "")]
    pub format: String,
}

/// Connects with the key at `key_path` and submits the export described by
/// `opts`, printing the accepted job or the submission error.
///
/// Only credential and connect failures are returned to the caller; a failed
/// submission is reported on stdout and the run still finishes cleanly.
pub async fn run(key_path: impl Into<std::path::PathBuf>, opts: Opts) -> Result<()> {
    let mut client = ExportClient::new(key_path);
    client.connect().await?;

    let source = TableLocation {
        project: opts.project_id,
        dataset: opts.dataset_id,
        table: opts.table_id,
    };
    match client
        .export(&source, &opts.cloud_storage_path, &opts.format)
        .await
    {
        Ok(job) => println!("{job:?}"),
        Err(err) => println!("export error: {err}"),
    }

    Ok(())
}
