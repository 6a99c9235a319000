use crate::explorer::domain::{Color, RootKind, StableKey};
use crate::explorer::services::SessionSettings;
use crate::shared::error::ExplorerError;
use crate::shared::Result;
use std::path::PathBuf;

/// Deepest level a snapshot may expand to
pub const MAX_DEPTH: usize = 32;

/// An explicit color for one stable key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideSpec {
    pub key: StableKey,
    pub color: Color,
}

/// ExploreRequest - what to load, select and render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExploreRequest {
    /// Workload definition files, already expanded from directories
    pub workloads: Vec<PathBuf>,
    /// Free-text subjects added to the workset
    pub subjects: Vec<String>,
    /// Exact package names added to the workset
    pub queries: Vec<String>,
    /// Relations whose requirers are added to the workset
    pub what_requires: Vec<String>,
    /// Root to render; all roots when `None`
    pub root: Option<RootKind>,
    /// Levels rendered below each root
    pub depth: usize,
    pub active_label: Option<String>,
    pub active_workload: Option<String>,
    pub overrides: Vec<OverrideSpec>,
    pub settings: SessionSettings,
}

impl Default for ExploreRequest {
    fn default() -> Self {
        Self {
            workloads: Vec::new(),
            subjects: Vec::new(),
            queries: Vec::new(),
            what_requires: Vec::new(),
            root: None,
            depth: 3,
            active_label: None,
            active_workload: None,
            overrides: Vec::new(),
            settings: SessionSettings::default(),
        }
    }
}

impl ExploreRequest {
    /// # Errors
    /// Returns a validation error for a zero batch size, an empty
    /// architecture list or a depth above [`MAX_DEPTH`]
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| -> anyhow::Error {
            ExplorerError::Validation { message }.into()
        };
        if self.settings.annotation_batch_size == 0 {
            return Err(invalid(
                "annotation batch size must be greater than 0".to_string(),
            ));
        }
        if self.settings.arches.is_empty() {
            return Err(invalid("at least one architecture is required".to_string()));
        }
        if self.depth > MAX_DEPTH {
            return Err(invalid(format!(
                "depth {} exceeds the maximum of {}",
                self.depth, MAX_DEPTH
            )));
        }
        Ok(())
    }
}
