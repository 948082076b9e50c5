//! The sequential fetch/merge loop.
//!
//! Partitioning and progress are shared by both strategies; only the merge
//! step differs. At most one request is in flight at any time and batches
//! are merged in plan order, so the output target sees a deterministic
//! append sequence.

use crate::batch::plan_batches;
use crate::progress;
use crate::sink::FeatureSink;
use geofetch_client::QueryService;
use geofetch_common::types::{FeatureCollection, ObjectId};
use geofetch_common::Result;
use tracing::{debug, info};

/// How batch results are merged into the output target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Accumulate every batch in memory and convert once after the loop.
    /// One sink call total; peak memory holds the full result set.
    Json,
    /// Convert each batch into the target as it arrives, creating the
    /// target on the first batch and appending afterwards. One sink call
    /// per batch; memory stays bounded by one batch.
    FeatureSet,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadSummary {
    pub num_batches: usize,
    pub feature_count: usize,
}

/// Fetch every feature for `ids` and merge the results into `sink`.
///
/// The ID list is partitioned into ranges of at most `batch_size` elements
/// and fetched strictly sequentially. Any fetch, parse, or sink failure
/// aborts the run immediately; no later batch is requested. An empty ID
/// list issues no requests and leaves the sink untouched under either
/// strategy.
pub async fn download<Q, S>(
    query: &Q,
    sink: &mut S,
    ids: &[ObjectId],
    batch_size: usize,
    strategy: Strategy,
) -> Result<DownloadSummary>
where
    Q: QueryService,
    S: FeatureSink,
{
    let plan = plan_batches(ids, batch_size)?;
    let num_batches = plan.len();
    if plan.is_empty() {
        info!("no object IDs to download");
        return Ok(DownloadSummary {
            num_batches: 0,
            feature_count: 0,
        });
    }

    // Strategy::Json accumulator. Owned here and handed to the sink in one
    // conversion after the loop; the first batch seeds the shared metadata.
    let mut accumulator: Option<FeatureCollection> = None;
    let mut feature_count = 0usize;

    for batch in &plan {
        progress::report_start(batch);
        let page = query.query_range(batch.begin_oid, batch.end_oid).await?;
        debug!(
            "batch {} of {} returned {} features",
            batch.ordinal,
            batch.total,
            page.features.len()
        );

        match strategy {
            Strategy::Json => {
                accumulator = Some(match accumulator.take() {
                    None => page,
                    Some(mut merged) => {
                        merged.features.extend(page.features);
                        merged
                    }
                });
            }
            Strategy::FeatureSet => {
                feature_count += page.features.len();
                if sink.exists().await? {
                    sink.append(&page).await?;
                } else {
                    sink.create(&page).await?;
                }
            }
        }
    }

    if let Some(merged) = accumulator {
        feature_count = merged.features.len();
        info!("converting {} accumulated features", feature_count);
        sink.create(&merged).await?;
    }

    progress::report_complete(feature_count, num_batches);
    Ok(DownloadSummary {
        num_batches,
        feature_count,
    })
}
