use crate::explorer::domain::WorkloadDefinition;
use std::path::Path;
use std::sync::Arc;

/// WorkloadReader port for loading workload definition files
///
/// Loading never fails: a missing, malformed or oversized file yields a
/// degraded [`WorkloadDefinition`] so the rest of the tree still builds.
pub trait WorkloadReader {
    /// Reads the workload definition at `path`
    fn read_workload(&self, path: &Path) -> Arc<WorkloadDefinition>;
}
