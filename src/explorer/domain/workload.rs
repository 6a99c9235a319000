use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A workload definition: a named set of wanted and unwanted packages,
/// tagged with labels (e.g. `eln`, `c9s`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkloadDefinition {
    pub path: PathBuf,
    pub name: Option<String>,
    pub document: Option<String>,
    pub labels: Vec<String>,
    pub packages: Vec<String>,
    pub arch_packages: BTreeMap<String, Vec<String>>,
    pub unwanted_packages: Vec<String>,
    pub unwanted_arch_packages: BTreeMap<String, Vec<String>>,
    pub unwanted_source_packages: Vec<String>,
    pub package_placeholders: Vec<String>,
    /// Why the definition could not be loaded; `None` for a healthy record
    pub degraded: Option<String>,
}

impl WorkloadDefinition {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Placeholder record for a file that is missing, malformed or too large
    pub fn degraded(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            degraded: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }

    /// Declared name, falling back to the file stem
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        file_stem(&self.path)
    }

    /// Wanted package subjects for the given architectures, in file order
    pub fn wanted_for(&self, arches: &[String]) -> Vec<String> {
        let mut result = self.packages.clone();
        extend_for_arches(&mut result, &self.arch_packages, arches);
        result
    }

    /// Unwanted binary package subjects for the given architectures
    pub fn unwanted_for(&self, arches: &[String]) -> Vec<String> {
        let mut result = self.unwanted_packages.clone();
        extend_for_arches(&mut result, &self.unwanted_arch_packages, arches);
        result
    }

    pub fn has_unwanted(&self) -> bool {
        !self.unwanted_packages.is_empty()
            || !self.unwanted_source_packages.is_empty()
            || self.unwanted_arch_packages.values().any(|v| !v.is_empty())
    }
}

fn extend_for_arches(
    result: &mut Vec<String>,
    by_arch: &BTreeMap<String, Vec<String>>,
    arches: &[String],
) {
    for arch in arches {
        if let Some(names) = by_arch.get(arch) {
            result.extend(names.iter().cloned());
        }
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
