/// Mock implementations for testing
mod mock_package_database;
mod mock_progress_reporter;
mod mock_workload_reader;

pub use mock_package_database::MockPackageDatabase;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_workload_reader::MockWorkloadReader;
