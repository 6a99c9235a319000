use crate::explorer::domain::NodeId;
use std::cmp::Reverse;

/// What the priority policy needs to know about a loaded workload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadCandidate {
    pub id: NodeId,
    /// The active workload, or one that was colored active by the previous pass
    pub sticky: bool,
    pub has_active_label: bool,
    pub has_unwanted: bool,
    pub child_count: usize,
}

/// WorkloadPriority policy for the order in which the annotation pass
/// visits workloads
///
/// Priority order:
/// 1. Sticky workloads (active now, or active in the previous pass)
/// 2. Workloads carrying the active label
/// 3. Workloads declaring unwanted packages
/// 4. Smaller workloads, compared by coarse size bucket
///
/// Ties keep the load order.
pub struct WorkloadPriority;

impl WorkloadPriority {
    /// Width of one size bucket, in direct children
    pub const SIZE_BUCKET_WIDTH: usize = 20;

    pub fn order(mut candidates: Vec<WorkloadCandidate>) -> Vec<WorkloadCandidate> {
        // sort_by_key is stable, which keeps load order for ties
        candidates.sort_by_key(|c| {
            (
                Reverse(c.sticky),
                Reverse(c.has_active_label),
                Reverse(c.has_unwanted),
                Self::size_bucket(c.child_count),
            )
        });
        candidates
    }

    pub fn size_bucket(child_count: usize) -> usize {
        child_count / Self::SIZE_BUCKET_WIDTH
    }
}
