//! Full download workflow: enumerate object IDs, probe the batch size,
//! then fetch and merge every range into a file sink.

use crate::output;
use anyhow::Result;
use geofetch_download::{download, JsonFileSink, Strategy};
use std::path::PathBuf;

/// Download every feature from a service layer
#[derive(Debug, clap::Parser)]
pub struct DownloadCommand {
    /// Feature service layer URL (e.g. .../FeatureServer/0)
    #[arg(short, long)]
    service_url: Option<String>,

    /// Output file; defaults to features_<timestamp>.jsonl
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Merge strategy
    #[arg(long, value_enum, default_value = "feature-set")]
    strategy: StrategyArg,

    /// Override the server-advertised maxRecordCount
    #[arg(short, long)]
    batch_size: Option<usize>,

    /// Object-ID field used in range predicates
    #[arg(long, default_value = "OBJECTID")]
    oid_field: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout_secs: u64,
}

/// Merge strategy flag
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum StrategyArg {
    /// Accumulate everything in memory, convert once at the end
    Json,
    /// Create-or-append the target batch by batch
    FeatureSet,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Json => Strategy::Json,
            StrategyArg::FeatureSet => Strategy::FeatureSet,
        }
    }
}

impl DownloadCommand {
    pub async fn run(self) -> Result<()> {
        let url = super::resolve_service_url(self.service_url)?;
        let client = super::build_client(url, self.oid_field, self.timeout_secs)?;

        output::print_info("enumerating object IDs...");
        let ids = client.fetch_object_ids().await?.object_ids;
        output::print_info(&format!("{} object IDs", ids.len()));

        let batch_size = match self.batch_size {
            Some(size) => size,
            None => client.fetch_service_info().await?.batch_size()?,
        };
        println!("Batch size: {}", batch_size);

        let path = self.output.unwrap_or_else(default_output_path);
        let mut sink = JsonFileSink::new(&path);
        let summary = download(&client, &mut sink, &ids, batch_size, self.strategy.into()).await?;

        output::print_success(&format!(
            "downloaded {} features in {} batches to {}",
            summary.feature_count,
            summary.num_batches,
            path.display()
        ));
        Ok(())
    }
}

/// Date-stamped default output name, alongside the working directory.
fn default_output_path() -> PathBuf {
    PathBuf::from(format!(
        "features_{}.jsonl",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ))
}
