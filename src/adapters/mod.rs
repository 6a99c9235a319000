/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the ports: the package
/// database, workload files, progress display, formatters and output.
pub mod outbound;
