//! Core bulk-download subsystem.
//!
//! Partitions a sorted object-ID list into server-safe contiguous batches,
//! fetches each range sequentially through a
//! [`QueryService`](geofetch_client::QueryService), and merges results into a
//! [`FeatureSink`] using one of two accumulation strategies: bulk in-memory
//! merge with a single final conversion, or incremental create-or-append per
//! batch.

pub mod batch;
pub mod download;
pub mod progress;
pub mod sink;

pub use batch::{plan_batches, Batch};
pub use download::{download, DownloadSummary, Strategy};
pub use sink::{FeatureSink, JsonFileSink, MemorySink};
