use clap::Parser;
use tracing::error;

use bqexport::{run, Opts};

/// Service account key document, read from the working directory.
const SERVICE_ACCOUNT_KEY_PATH: &str = "service_account.json";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let opts = Opts::parse();
    if let Err(err) = run(SERVICE_ACCOUNT_KEY_PATH, opts).await {
        error!(%err, "could not prepare the BigQuery client");
        std::process::exit(1);
    }
}
