//! Tree snapshot read model
//!
//! Plain, serializable view of a rendered portion of the dependency tree.

use crate::explorer::domain::Color;
use serde::Serialize;

/// A rendered portion of the explorer tree
#[derive(Debug, Clone, Serialize)]
pub struct TreeSnapshot {
    pub metadata: SnapshotMetadata,
    pub roots: Vec<TreeNodeView>,
}

/// When and how the snapshot was taken
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotMetadata {
    /// RFC 3339 timestamp
    pub timestamp: String,
    pub tool_name: String,
    pub tool_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_workload: Option<String>,
    pub collapse_requirements: bool,
    /// Levels rendered below each root
    pub depth: usize,
}

impl SnapshotMetadata {
    pub fn new(
        active_label: Option<String>,
        active_workload: Option<String>,
        collapse_requirements: bool,
        depth: usize,
    ) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            tool_name: env!("CARGO_PKG_NAME").to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            active_label,
            active_workload,
            collapse_requirements,
            depth,
        }
    }
}

/// One displayed node and its rendered children
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNodeView {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// Children exist below the rendered depth
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub truncated: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNodeView>,
}

impl TreeNodeView {
    /// Number of nodes in this subtree, itself included
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(TreeNodeView::count).sum::<usize>()
    }

    /// First node in this subtree (pre-order) with the given label
    pub fn find(&self, label: &str) -> Option<&TreeNodeView> {
        if self.label == label {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(label))
    }
}

impl TreeSnapshot {
    pub fn root(&self, label: &str) -> Option<&TreeNodeView> {
        self.roots.iter().find(|root| root.label == label)
    }

    pub fn node_count(&self) -> usize {
        self.roots.iter().map(TreeNodeView::count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(label: &str) -> TreeNodeView {
        TreeNodeView {
            label: label.to_string(),
            icon: None,
            color: None,
            truncated: false,
            children: Vec::new(),
        }
    }

    #[test]
    fn test_metadata_carries_tool_info() {
        let metadata = SnapshotMetadata::new(Some("eln".into()), None, true, 3);
        assert_eq!(metadata.tool_name, "pkg-explorer");
        assert_eq!(metadata.tool_version, env!("CARGO_PKG_VERSION"));
        assert!(chrono::DateTime::parse_from_rfc3339(&metadata.timestamp).is_ok());
    }

    #[test]
    fn test_find_and_count() {
        let mut root = leaf("workset");
        let mut scipy = leaf("python3-scipy");
        scipy.children.push(leaf("python3-numpy"));
        root.children.push(scipy);

        assert_eq!(root.count(), 3);
        assert!(root.find("python3-numpy").is_some());
        assert!(root.find("python3-pandas").is_none());

        let snapshot = TreeSnapshot {
            metadata: SnapshotMetadata::new(None, None, true, 2),
            roots: vec![root, leaf("labels")],
        };
        assert_eq!(snapshot.node_count(), 4);
        assert!(snapshot.root("labels").is_some());
    }

    #[test]
    fn test_serialization_omits_empty_fields() {
        let mut node = leaf("python3-numpy");
        node.color = Some(Color::Selected);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["label"], "python3-numpy");
        assert!(json.get("icon").is_none());
        assert!(json.get("truncated").is_none());
        assert!(json.get("children").is_none());
        assert!(json["color"].is_string());
    }
}
