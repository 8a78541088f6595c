use std::path::PathBuf;

use gcp_bigquery_client::client_builder::ClientBuilder;
use gcp_bigquery_client::model::job::Job;
use gcp_bigquery_client::model::job_configuration::JobConfiguration;
use gcp_bigquery_client::model::job_configuration_extract::JobConfigurationExtract;
use gcp_bigquery_client::model::table_reference::TableReference;
use gcp_bigquery_client::yup_oauth2::parse_service_account_key;
use gcp_bigquery_client::Client;
use tokio::fs;
use tracing::info;

use crate::error::{ExportError, Result};

/// Every extract destination is compressed; this is not configurable.
const EXTRACT_COMPRESSION: &str = "GZIP";

/// Source table coordinates for an extract job.
#[derive(Debug, Clone)]
pub struct TableLocation {
    pub project: String,
    pub dataset: String,
    pub table: String,
}

/// BigQuery client wrapper: the credential file path plus, once
/// [`connect`](ExportClient::connect) has run, the live service handle.
///
/// The query-tuning fields are accepted for parity with the wider client
/// surface; the export path does not read them.
pub struct ExportClient {
    key_path: PathBuf,
    service: Option<Client>,
    pub allow_large_results: bool,
    pub temp_table_name: Option<String>,
    pub flatten_results: bool,
}

impl ExportClient {
    pub fn new(key_path: impl Into<PathBuf>) -> Self {
        ExportClient {
            key_path: key_path.into(),
            service: None,
            allow_large_results: false,
            temp_table_name: None,
            flatten_results: false,
        }
    }

    pub fn with_allow_large_results(mut self, allow: bool) -> Self {
        self.allow_large_results = allow;
        self
    }

    pub fn with_temp_table_name(mut self, name: impl Into<String>) -> Self {
        self.temp_table_name = Some(name.into());
        self
    }

    pub fn with_flatten_results(mut self, flatten: bool) -> Self {
        self.flatten_results = flatten;
        self
    }

    /// Opens the connection to BigQuery, reusing the established service
    /// handle when one exists. The key file is read exactly once per client;
    /// token refresh afterwards is the transport's job.
    ///
    /// An unreadable or malformed key file is a [`ExportError::Credential`]
    /// error and happens before anything touches the network. A failure to
    /// build the service handle itself is [`ExportError::Connect`].
    pub async fn connect(&mut self) -> Result<&Client> {
        if self.service.is_none() {
            let raw = fs::read_to_string(&self.key_path)
                .await
                .map_err(|source| ExportError::Credential {
                    path: self.key_path.clone(),
                    source,
                })?;
            let key = parse_service_account_key(&raw).map_err(|source| {
                ExportError::Credential {
                    path: self.key_path.clone(),
                    source,
                }
            })?;

            info!(email = %key.client_email, "building BigQuery service handle");
            let service = ClientBuilder::new()
                .build_from_service_account_key(key, false)
                .await
                .map_err(ExportError::Connect)?;
            self.service = Some(service);
        }

        self.service.as_ref().ok_or(ExportError::NotConnected)
    }

    /// Submits an extract job copying `source` to `destination_uri` in the
    /// requested output format, and returns the job as accepted by the
    /// service. The export itself completes asynchronously on the BigQuery
    /// side; nothing here waits for it.
    ///
    /// Inputs are passed through verbatim. Empty or malformed identifiers
    /// are rejected by the service, not locally.
    pub async fn export(
        &self,
        source: &TableLocation,
        destination_uri: &str,
        format: &str,
    ) -> Result<Job> {
        let service = self.service.as_ref().ok_or(ExportError::NotConnected)?;

        let job = extract_job(source, destination_uri, format);
        println!("{}", serde_json::to_string_pretty(&job)?);
        println!("{job:?}");

        info!(
            project = %source.project,
            dataset = %source.dataset,
            table = %source.table,
            destination = %destination_uri,
            "submitting extract job"
        );
        let accepted = service
            .job()
            .insert(&source.project, job)
            .await
            .map_err(ExportError::Submit)?;
        info!(
            job_id = accepted.id.as_deref().unwrap_or("unknown"),
            "extract job accepted"
        );

        Ok(accepted)
    }
}

/// Builds the job document for a table export: source coordinates, a single
/// destination URI, the caller's output format and fixed GZIP compression.
fn extract_job(source: &TableLocation, destination_uri: &str, format: &str) -> Job {
    Job {
        configuration: Some(JobConfiguration {
            extract: Some(JobConfigurationExtract {
                source_table: Some(TableReference {
                    project_id: source.project.clone(),
                    dataset_id: source.dataset.clone(),
                    table_id: source.table.clone(),
                }),
                destination_uris: Some(vec![destination_uri.to_owned()]),
                destination_format: Some(format.to_owned()),
                compression: Some(EXTRACT_COMPRESSION.to_owned()),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}
