//! pkg-explorer - dependency-tree explorer for RPM repositories and workloads
//!
//! This library builds a lazy, collapsible tree over a package database and
//! a set of workload definitions, annotates it with colors derived from the
//! active label and workload, and keeps addresses held by a view valid
//! across structural changes. It follows hexagonal architecture and
//! Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`explorer`): node model, resolver, node tree,
//!   annotation engine and address stabilizer
//! - **Application Layer** (`application`): Use cases, DTOs and read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use pkg_explorer::prelude::*;
//! use std::path::{Path, PathBuf};
//!
//! # fn main() -> Result<()> {
//! // Create adapters
//! let database = TomlPackageDatabase::load(Path::new("repo.toml"))?;
//! let workload_reader = YamlWorkloadReader::new();
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = ExploreTreeUseCase::new(database, workload_reader, progress_reporter);
//!
//! // Execute
//! let request = ExploreRequest {
//!     workloads: vec![PathBuf::from("workloads/scipy.yaml")],
//!     active_label: Some("eln".to_string()),
//!     ..ExploreRequest::default()
//! };
//! let response = use_case.explore(request)?;
//!
//! // Format output
//! let output = TextTreeFormatter::new(false, true).format(&response.snapshot)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod explorer;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::database::InMemoryPackageDatabase;
    pub use crate::adapters::outbound::filesystem::{
        discover_workload_files, FileSystemWriter, StdoutPresenter, TomlPackageDatabase,
        YamlWorkloadReader,
    };
    pub use crate::adapters::outbound::formatters::{JsonTreeFormatter, TextTreeFormatter};
    pub use crate::application::dto::{ExploreRequest, ExploreResponse, OutputFormat};
    pub use crate::application::read_models::{TreeNodeView, TreeSnapshot};
    pub use crate::application::use_cases::ExploreTreeUseCase;
    pub use crate::explorer::domain::{
        Color, ItemData, ItemRole, ModelIndex, Node, PackageRecord, RootKind, StableKey,
        WorkloadDefinition,
    };
    pub use crate::explorer::services::{ExplorerSession, SessionSettings, TickOutcome};
    pub use crate::ports::inbound::{ExploreTreePort, TreeIndexAdapter};
    pub use crate::ports::outbound::{
        OutputPresenter, PackageDatabase, PackageQuery, ProgressReporter, TreeFormatter,
        WorkloadReader,
    };
    pub use crate::shared::Result;
}
