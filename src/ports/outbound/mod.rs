/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the explorer core and the
/// application layer use to reach repository metadata, workload files,
/// the console and the output destination.
pub mod output_presenter;
pub mod package_database;
pub mod progress_reporter;
pub mod tree_formatter;
pub mod workload_reader;

pub use output_presenter::OutputPresenter;
pub use package_database::{PackageDatabase, PackageQuery};
pub use progress_reporter::ProgressReporter;
pub use tree_formatter::TreeFormatter;
pub use workload_reader::WorkloadReader;
