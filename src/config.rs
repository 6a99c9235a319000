//! Configuration file support for pkg-explorer.
//!
//! Provides YAML-based configuration through `pkg-explorer.config.yml`
//! files, including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use pkg_explorer::application::dto::OverrideSpec;
use pkg_explorer::explorer::domain::{Color, RootKind, StableKey};
use pkg_explorer::shared::Result;

pub const CONFIG_FILENAME: &str = "pkg-explorer.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub database: Option<PathBuf>,
    pub workloads: Option<Vec<PathBuf>>,
    pub arches: Option<Vec<String>>,
    pub collapse_requirements: Option<bool>,
    pub annotation_batch_size: Option<usize>,
    pub active_label: Option<String>,
    pub active_workload: Option<String>,
    pub overrides: Option<Vec<ColorOverride>>,
    pub root: Option<String>,
    pub depth: Option<usize>,
    pub format: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// An explicit color for a package, label or requirement.
///
/// Exactly one of `package`, `label` and `requirement` must be set.
#[derive(Debug, Deserialize)]
pub struct ColorOverride {
    pub package: Option<String>,
    pub label: Option<String>,
    pub requirement: Option<String>,
    pub color: String,
}

impl ColorOverride {
    fn key(&self) -> Option<StableKey> {
        match (&self.package, &self.label, &self.requirement) {
            (Some(name), None, None) => Some(StableKey::Package(name.clone())),
            (None, Some(name), None) => Some(StableKey::Label(name.clone())),
            (None, None, Some(reldep)) => Some(StableKey::Requirement(reldep.clone())),
            _ => None,
        }
    }
}

impl ConfigFile {
    /// Overrides as request values; only valid after [`validate_config`]
    pub fn override_specs(&self) -> Vec<OverrideSpec> {
        self.overrides
            .iter()
            .flatten()
            .filter_map(|entry| {
                let key = entry.key()?;
                let color = Color::from_str(&entry.color).ok()?;
                Some(OverrideSpec { key, color })
            })
            .collect()
    }

    pub fn root_kind(&self) -> Option<RootKind> {
        self.root
            .as_deref()
            .and_then(|root| RootKind::from_str(root).ok())
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.annotation_batch_size == Some(0) {
        bail!(
            "Invalid config: annotation_batch_size must be greater than 0.\n\n\
             💡 Hint: Omit the field to use the default of 50 steps per batch."
        );
    }

    if let Some(ref arches) = config.arches {
        if arches.is_empty() || arches.iter().any(|arch| arch.trim().is_empty()) {
            bail!(
                "Invalid config: arches must list at least one non-empty architecture.\n\n\
                 💡 Hint: For example `arches: [x86_64, noarch]`."
            );
        }
    }

    if let Some(ref root) = config.root {
        if let Err(e) = RootKind::from_str(root) {
            bail!("Invalid config: root: {}", e);
        }
    }

    if let Some(ref overrides) = config.overrides {
        for (i, entry) in overrides.iter().enumerate() {
            if entry.key().is_none() {
                bail!(
                    "Invalid config: overrides[{}] must set exactly one of 'package', 'label' or 'requirement'.\n\n\
                     💡 Hint: For example `- package: python3-numpy` followed by `color: \"#ff8000\"`.",
                    i
                );
            }
            if let Err(e) = Color::from_str(&entry.color) {
                bail!("Invalid config: overrides[{}].color: {}", i, e);
            }
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
