use crate::application::dto::{ExploreRequest, ExploreResponse};
use crate::shared::Result;

/// ExploreTreePort - Inbound port for the non-interactive explore use case
///
/// Builds a session from the request, runs annotation to completion and
/// returns a snapshot of the displayed tree.
pub trait ExploreTreePort {
    /// Explores the dependency tree described by `request`
    ///
    /// # Errors
    /// Returns an error if the request is invalid (e.g. a zero batch size).
    /// Lookup misses and unreadable workloads are not errors; they show up
    /// as empty or degraded nodes in the snapshot.
    fn explore(&self, request: ExploreRequest) -> Result<ExploreResponse>;
}
