mod workload_priority;

pub use workload_priority::{WorkloadCandidate, WorkloadPriority};
