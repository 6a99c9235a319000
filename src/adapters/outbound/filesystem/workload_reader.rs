use crate::explorer::domain::WorkloadDefinition;
use crate::ports::outbound::WorkloadReader;
use crate::shared::error::ExplorerError;
use crate::shared::security::{validate_regular_file, MAX_WORKLOAD_SIZE};
use crate::shared::Result;
use dashmap::DashMap;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

/// Top level of a workload YAML file
#[derive(Debug, Deserialize)]
struct WorkloadFile {
    document: Option<String>,
    data: Option<WorkloadData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct WorkloadData {
    name: Option<String>,
    labels: Vec<String>,
    packages: Vec<String>,
    arch_packages: BTreeMap<String, Vec<String>>,
    unwanted_packages: Vec<String>,
    unwanted_arch_packages: BTreeMap<String, Vec<String>>,
    unwanted_source_packages: Vec<String>,
    package_placeholders: Placeholders,
}

/// Placeholders are either plain names or a map keyed by name
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Placeholders {
    Names(Vec<String>),
    Described(BTreeMap<String, serde_yaml_ng::Value>),
}

impl Default for Placeholders {
    fn default() -> Self {
        Placeholders::Names(Vec::new())
    }
}

impl Placeholders {
    fn into_names(self) -> Vec<String> {
        match self {
            Placeholders::Names(names) => names,
            Placeholders::Described(map) => map.into_keys().collect(),
        }
    }
}

/// Modification time and size of the file a definition was parsed from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fingerprint {
    modified: Option<SystemTime>,
    size: u64,
}

/// YamlWorkloadReader adapter reading workload definition files
///
/// Parsed definitions are cached in memory by path and reused while the
/// file's modification time and size are unchanged. Files that cannot be
/// read or parsed, or that are larger than [`MAX_WORKLOAD_SIZE`], become
/// degraded definitions.
pub struct YamlWorkloadReader {
    cache: DashMap<PathBuf, (Fingerprint, Arc<WorkloadDefinition>)>,
}

impl YamlWorkloadReader {
    pub fn new() -> Self {
        Self {
            cache: DashMap::new(),
        }
    }

    /// Number of cached definitions
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    fn load(path: &Path, fingerprint: Fingerprint) -> WorkloadDefinition {
        if fingerprint.size > MAX_WORKLOAD_SIZE {
            return WorkloadDefinition::degraded(
                path,
                format!(
                    "file is too large ({} bytes, limit {} bytes)",
                    fingerprint.size, MAX_WORKLOAD_SIZE
                ),
            );
        }

        match Self::parse(path) {
            Ok(definition) => definition,
            Err(e) => WorkloadDefinition::degraded(path, format!("{:#}", e)),
        }
    }

    fn parse(path: &Path) -> Result<WorkloadDefinition> {
        let content = fs::read_to_string(path).map_err(|e| ExplorerError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;
        let file: WorkloadFile = serde_yaml_ng::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid workload YAML: {}", e))?;
        let data = file
            .data
            .ok_or_else(|| anyhow::anyhow!("missing 'data' section"))?;

        Ok(WorkloadDefinition {
            path: path.to_path_buf(),
            name: data.name,
            document: file.document,
            labels: data.labels,
            packages: data.packages,
            arch_packages: data.arch_packages,
            unwanted_packages: data.unwanted_packages,
            unwanted_arch_packages: data.unwanted_arch_packages,
            unwanted_source_packages: data.unwanted_source_packages,
            package_placeholders: data.package_placeholders.into_names(),
            degraded: None,
        })
    }
}

impl Default for YamlWorkloadReader {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkloadReader for YamlWorkloadReader {
    fn read_workload(&self, path: &Path) -> Arc<WorkloadDefinition> {
        let metadata = match validate_regular_file(path, "Workload file") {
            Ok(metadata) => metadata,
            Err(e) => {
                self.cache.remove(path);
                return Arc::new(WorkloadDefinition::degraded(path, format!("{:#}", e)));
            }
        };
        let fingerprint = Fingerprint {
            modified: metadata.modified().ok(),
            size: metadata.len(),
        };

        if let Some(entry) = self.cache.get(path) {
            let (cached, definition) = entry.value();
            if *cached == fingerprint {
                return definition.clone();
            }
        }

        log::debug!("Parsing workload {}", path.display());
        let definition = Arc::new(Self::load(path, fingerprint));
        self.cache
            .insert(path.to_path_buf(), (fingerprint, definition.clone()));
        definition
    }
}

/// Expands workload arguments: files are taken as given, directories
/// contribute their `*.yaml` / `*.yml` files in name order
///
/// # Errors
/// Returns an error if a path does not exist or a directory cannot be listed
pub fn discover_workload_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let entries = fs::read_dir(path).map_err(|e| ExplorerError::InvalidWorkloadPath {
                path: path.clone(),
                reason: format!("cannot list directory: {}", e),
            })?;
            let mut found: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| {
                    p.extension()
                        .is_some_and(|ext| ext == "yaml" || ext == "yml")
                })
                .collect();
            found.sort();
            files.extend(found);
        } else if path.exists() || fs::symlink_metadata(path).is_ok() {
            files.push(path.clone());
        } else {
            return Err(ExplorerError::InvalidWorkloadPath {
                path: path.clone(),
                reason: "no such file or directory".to_string(),
            }
            .into());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SCIPY_WORKLOAD: &str = r#"
document: feedback-pipeline-workload
version: 1
data:
  name: SciPy stack
  labels:
    - eln
  packages:
    - python3-scipy
    - python3-numpy
  arch_packages:
    x86_64:
      - intel-mkl
  unwanted_packages:
    - texlive
  unwanted_source_packages:
    - kernel
  package_placeholders:
    python3-magic:
      description: not packaged yet
"#;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_reads_workload() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "scipy.yaml", SCIPY_WORKLOAD);

        let wl = YamlWorkloadReader::new().read_workload(&path);
        assert!(!wl.is_degraded());
        assert_eq!(wl.display_name(), "SciPy stack");
        assert_eq!(wl.document.as_deref(), Some("feedback-pipeline-workload"));
        assert_eq!(wl.labels, vec!["eln"]);
        assert_eq!(wl.packages, vec!["python3-scipy", "python3-numpy"]);
        assert_eq!(wl.arch_packages["x86_64"], vec!["intel-mkl"]);
        assert_eq!(wl.unwanted_source_packages, vec!["kernel"]);
        assert_eq!(wl.package_placeholders, vec!["python3-magic"]);
    }

    #[test]
    fn test_placeholders_as_list() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "wl.yaml",
            "data:\n  package_placeholders:\n    - foo\n    - bar\n",
        );
        let wl = YamlWorkloadReader::new().read_workload(&path);
        assert_eq!(wl.package_placeholders, vec!["foo", "bar"]);
    }

    #[test]
    fn test_cache_reused_until_file_changes() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "scipy.yaml", SCIPY_WORKLOAD);
        let reader = YamlWorkloadReader::new();

        let first = reader.read_workload(&path);
        let second = reader.read_workload(&path);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(reader.cache_size(), 1);

        fs::write(&path, "data:\n  labels: [c9s]\n").unwrap();
        let third = reader.read_workload(&path);
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(third.labels, vec!["c9s"]);
    }

    #[test]
    fn test_malformed_yaml_is_degraded() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "broken.yaml", "data: [unclosed\n");
        let wl = YamlWorkloadReader::new().read_workload(&path);
        assert!(wl.is_degraded());
        assert!(wl.degraded.as_deref().unwrap().contains("invalid workload YAML"));
    }

    #[test]
    fn test_missing_data_section_is_degraded() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "empty.yaml", "document: feedback-pipeline-workload\n");
        let wl = YamlWorkloadReader::new().read_workload(&path);
        assert!(wl.degraded.as_deref().unwrap().contains("missing 'data'"));
    }

    #[test]
    fn test_oversized_file_is_degraded_without_parsing() {
        let dir = TempDir::new().unwrap();
        let mut content = String::from("data:\n  packages:\n");
        while content.len() as u64 <= MAX_WORKLOAD_SIZE {
            content.push_str("    - some-package-name\n");
        }
        let path = write(&dir, "huge.yaml", &content);

        let wl = YamlWorkloadReader::new().read_workload(&path);
        assert!(wl.is_degraded());
        assert!(wl.degraded.as_deref().unwrap().contains("too large"));
        assert!(wl.packages.is_empty());
    }

    #[test]
    fn test_missing_file_is_degraded() {
        let wl = YamlWorkloadReader::new().read_workload(Path::new("/nonexistent/wl.yaml"));
        assert!(wl.is_degraded());
        assert_eq!(wl.display_name(), "wl");
    }

    #[test]
    fn test_discover_workload_files() {
        let dir = TempDir::new().unwrap();
        write(&dir, "b.yaml", "data: {}\n");
        write(&dir, "a.yml", "data: {}\n");
        write(&dir, "notes.txt", "");
        let single = write(&dir, "c.yaml", "data: {}\n");

        let files = discover_workload_files(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.yml", "b.yaml", "c.yaml"]);

        assert_eq!(discover_workload_files(&[single.clone()]).unwrap(), vec![single]);
    }

    #[test]
    fn test_discover_rejects_missing_path() {
        let err = discover_workload_files(&[PathBuf::from("/nonexistent/workloads")]).unwrap_err();
        assert!(err.to_string().contains("Invalid workload path"));
    }
}
