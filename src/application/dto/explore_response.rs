use crate::application::read_models::TreeSnapshot;
use std::path::PathBuf;

/// ExploreResponse - the rendered-to-be tree and what happened on the way
#[derive(Debug, Clone)]
pub struct ExploreResponse {
    pub snapshot: TreeSnapshot,
    /// Workload files that could not be loaded, with the reason
    pub degraded_workloads: Vec<(PathBuf, String)>,
    /// Scheduler ticks the annotation pass took
    pub annotation_ticks: usize,
}
