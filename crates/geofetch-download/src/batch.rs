//! Partitioning of an object-ID list into server-safe query ranges.

use geofetch_common::types::ObjectId;
use geofetch_common::{Error, Result};

/// One contiguous range of object IDs queried in a single request.
///
/// `begin_oid` and `end_oid` are the first and last *values* of the chunk,
/// never synthesized boundaries, so gaps in the ID space cannot pull foreign
/// records into a range and no ID can land in two batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch {
    /// First object ID in the chunk
    pub begin_oid: ObjectId,
    /// Last object ID in the chunk (inclusive)
    pub end_oid: ObjectId,
    /// 1-based position of this batch in the plan
    pub ordinal: usize,
    /// Total number of batches in the plan
    pub total: usize,
}

/// Partition a sorted object-ID list into consecutive chunks of at most
/// `batch_size` elements, preserving order. The last chunk's `end_oid` is
/// the list's final element, however short the chunk comes up.
///
/// `batch_size` usually comes from the server's advertised `maxRecordCount`;
/// either way it must be positive or the plan fails fast.
pub fn plan_batches(ids: &[ObjectId], batch_size: usize) -> Result<Vec<Batch>> {
    if batch_size == 0 {
        return Err(Error::Config(
            "batch size must be a positive integer".to_string(),
        ));
    }
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let total = ids.len().div_ceil(batch_size);
    let batches = ids
        .chunks(batch_size)
        .enumerate()
        .map(|(i, chunk)| Batch {
            begin_oid: chunk[0],
            end_oid: chunk[chunk.len() - 1],
            ordinal: i + 1,
            total,
        })
        .collect();
    Ok(batches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_correctness() {
        let ids: Vec<ObjectId> = (1..=23).collect();
        let plan = plan_batches(&ids, 10).unwrap();

        assert_eq!(plan.len(), 3);
        assert_eq!((plan[0].begin_oid, plan[0].end_oid), (1, 10));
        assert_eq!((plan[1].begin_oid, plan[1].end_oid), (11, 20));
        // Last chunk clamps to the final ID, not begin + batch_size - 1.
        assert_eq!((plan[2].begin_oid, plan[2].end_oid), (21, 23));
        assert!(plan.iter().all(|b| b.total == 3));
    }

    #[test]
    fn test_batch_count_is_ceiling_division() {
        for (len, size, expected) in [(23usize, 10usize, 3usize), (20, 10, 2), (21, 10, 3), (9, 10, 1), (100, 1, 100)] {
            let ids: Vec<ObjectId> = (1..=len as ObjectId).collect();
            let plan = plan_batches(&ids, size).unwrap();
            assert_eq!(plan.len(), expected, "len={} size={}", len, size);
            assert_eq!(plan.len(), len.div_ceil(size));
        }
    }

    #[test]
    fn test_partition_completeness_with_gaps() {
        // Sparse IDs: boundaries must be values from the list, ranges disjoint
        // and increasing, and every ID covered exactly once.
        let ids: Vec<ObjectId> = vec![3, 7, 8, 15, 40, 41, 42, 90, 105];
        let plan = plan_batches(&ids, 4).unwrap();

        assert_eq!(plan.len(), 3);
        assert_eq!((plan[0].begin_oid, plan[0].end_oid), (3, 15));
        assert_eq!((plan[1].begin_oid, plan[1].end_oid), (40, 90));
        assert_eq!((plan[2].begin_oid, plan[2].end_oid), (105, 105));

        let covered: Vec<ObjectId> = ids
            .chunks(4)
            .flat_map(|chunk| chunk.iter().copied())
            .collect();
        assert_eq!(covered, ids);

        for pair in plan.windows(2) {
            assert!(pair[0].end_oid < pair[1].begin_oid);
        }
    }

    #[test]
    fn test_single_element() {
        let plan = plan_batches(&[5], 10).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!((plan[0].begin_oid, plan[0].end_oid), (5, 5));
        assert_eq!((plan[0].ordinal, plan[0].total), (1, 1));
    }

    #[test]
    fn test_empty_input() {
        let plan = plan_batches(&[], 10).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_zero_batch_size_fails_fast() {
        assert!(matches!(plan_batches(&[1, 2, 3], 0), Err(Error::Config(_))));
    }

    #[test]
    fn test_ordinals_are_one_based_and_sequential() {
        let ids: Vec<ObjectId> = (1..=50).collect();
        let plan = plan_batches(&ids, 10).unwrap();
        let ordinals: Vec<usize> = plan.iter().map(|b| b.ordinal).collect();
        assert_eq!(ordinals, vec![1, 2, 3, 4, 5]);
    }
}
