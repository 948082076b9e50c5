//! Progress reporting for the download loop.
//!
//! One human-readable line per batch on stdout, mirrored to the trace log.
//! The percentage counts *completed* batches over the total, so the last
//! in-loop value is `(n-1)/n * 100`; the summary line after the loop marks
//! actual completion.

use crate::batch::Batch;
use tracing::debug;

/// Fraction of the run complete before `batch` starts, as a percentage.
pub fn percent_before(batch: &Batch) -> f64 {
    (batch.ordinal as f64 - 1.0) / batch.total as f64 * 100.0
}

/// Print the per-batch progress line as the batch starts.
pub fn report_start(batch: &Batch) {
    println!(
        "Downloading {} to {} ({} of {}, {:.1}%)",
        batch.begin_oid,
        batch.end_oid,
        batch.ordinal,
        batch.total,
        percent_before(batch)
    );
    debug!(
        "starting batch {} of {} (OIDs {} to {})",
        batch.ordinal, batch.total, batch.begin_oid, batch.end_oid
    );
}

/// Print the completion summary after the loop finishes.
pub fn report_complete(feature_count: usize, num_batches: usize) {
    println!(
        "Downloaded {} features in {} batches",
        feature_count, num_batches
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::plan_batches;
    use geofetch_common::types::ObjectId;

    #[test]
    fn test_percent_starts_at_zero() {
        let plan = plan_batches(&[1, 2, 3], 2).unwrap();
        assert_eq!(percent_before(&plan[0]), 0.0);
    }

    #[test]
    fn test_percent_is_monotonic_and_never_hits_100() {
        let ids: Vec<ObjectId> = (1..=47).collect();
        let plan = plan_batches(&ids, 10).unwrap();

        let percents: Vec<f64> = plan.iter().map(percent_before).collect();
        for pair in percents.windows(2) {
            assert!(pair[1] > pair[0]);
        }
        // Last in-loop value is (n-1)/n; only the summary marks completion.
        let last = *percents.last().unwrap();
        assert!((last - 80.0).abs() < f64::EPSILON);
        assert!(percents.iter().all(|p| *p < 100.0));
    }

    #[test]
    fn test_single_batch_reports_zero_percent() {
        let plan = plan_batches(&[5], 10).unwrap();
        assert_eq!(percent_before(&plan[0]), 0.0);
    }
}
