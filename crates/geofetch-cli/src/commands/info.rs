//! Service metadata inspection.

use anyhow::Result;

/// Show service metadata and object-ID count
#[derive(Debug, clap::Parser)]
pub struct InfoCommand {
    /// Feature service layer URL (e.g. .../FeatureServer/0)
    #[arg(short, long)]
    service_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout_secs: u64,
}

impl InfoCommand {
    pub async fn run(self) -> Result<()> {
        let url = super::resolve_service_url(self.service_url)?;
        let client = super::build_client(url, "OBJECTID".to_string(), self.timeout_secs)?;

        let info = client.fetch_service_info().await?;
        let ids = client.fetch_object_ids().await?;

        if let Some(name) = &info.name {
            println!("Service: {}", name);
        }
        println!("Max record count: {}", info.max_record_count);
        println!("Object IDs: {}", ids.object_ids.len());
        println!(
            "Batches required: {}",
            ids.object_ids.len().div_ceil(info.batch_size()?)
        );
        Ok(())
    }
}
