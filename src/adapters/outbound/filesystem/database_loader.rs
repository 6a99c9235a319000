use crate::adapters::outbound::database::InMemoryPackageDatabase;
use crate::explorer::domain::PackageRecord;
use crate::shared::error::ExplorerError;
use crate::shared::security::{safe_read_to_string, MAX_DATABASE_SIZE};
use crate::shared::Result;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RepositorySnapshot {
    #[serde(default, rename = "package")]
    packages: Vec<PackageRecord>,
}

/// TomlPackageDatabase adapter loading a repository snapshot
///
/// The snapshot is a TOML file with one `[[package]]` table per package
/// record. It is read with the same checks as any other input file (regular
/// file, no symlink, size limit) and served from memory afterwards.
pub struct TomlPackageDatabase;

impl TomlPackageDatabase {
    /// Loads the snapshot at `path`
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist
    /// - The file is a symlink, not a regular file, or too large
    /// - The TOML is malformed or a record misses a required field
    pub fn load(path: &Path) -> Result<InMemoryPackageDatabase> {
        if !path.exists() && std::fs::symlink_metadata(path).is_err() {
            return Err(ExplorerError::DatabaseNotFound {
                path: path.to_path_buf(),
                suggestion: "Pass a repository snapshot with --database or set 'database' in the config file".to_string(),
            }
            .into());
        }

        let content = safe_read_to_string(path, "Package database", MAX_DATABASE_SIZE)?;
        let snapshot: RepositorySnapshot =
            toml::from_str(&content).map_err(|e| ExplorerError::DatabaseParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;

        log::info!(
            "Loaded {} package records from {}",
            snapshot.packages.len(),
            path.display()
        );
        Ok(InMemoryPackageDatabase::new(snapshot.packages))
    }
}
