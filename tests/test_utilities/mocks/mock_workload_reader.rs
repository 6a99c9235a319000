use pkg_explorer::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock WorkloadReader serving definitions from memory
///
/// Unknown paths yield a degraded definition, like a missing file would.
#[derive(Default)]
pub struct MockWorkloadReader {
    workloads: HashMap<PathBuf, Arc<WorkloadDefinition>>,
    reads: AtomicUsize,
}

impl MockWorkloadReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workload(mut self, definition: WorkloadDefinition) -> Self {
        self.workloads
            .insert(definition.path.clone(), Arc::new(definition));
        self
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl WorkloadReader for MockWorkloadReader {
    fn read_workload(&self, path: &Path) -> Arc<WorkloadDefinition> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.workloads
            .get(path)
            .cloned()
            .unwrap_or_else(|| Arc::new(WorkloadDefinition::degraded(path, "file not found")))
    }
}
