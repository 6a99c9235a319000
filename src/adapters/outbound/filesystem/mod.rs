/// Filesystem adapters: repository snapshot, workload files and output
mod database_loader;
mod file_writer;
mod workload_reader;

pub use database_loader::TomlPackageDatabase;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use workload_reader::{discover_workload_files, YamlWorkloadReader};
