//! Builder walking a [`TreeIndexAdapter`] into a [`TreeSnapshot`]

use super::tree_snapshot::{SnapshotMetadata, TreeNodeView, TreeSnapshot};
use crate::explorer::domain::{ItemData, ItemRole, ModelIndex};
use crate::ports::inbound::TreeIndexAdapter;

/// Builds snapshots through the same adapter a tree view would use, so the
/// snapshot shows exactly what a view shows: collapsed nodes, effective
/// nodes and annotation colors.
pub struct TreeSnapshotBuilder;

impl TreeSnapshotBuilder {
    /// # Arguments
    /// * `model` - Adapter to walk
    /// * `roots` - Addresses rendered at the top level
    /// * `depth` - Levels rendered below each root
    /// * `metadata` - Metadata stored with the snapshot
    pub fn build<A: TreeIndexAdapter>(
        model: &A,
        roots: &[ModelIndex],
        depth: usize,
        metadata: SnapshotMetadata,
    ) -> TreeSnapshot {
        let roots = roots
            .iter()
            .filter(|index| index.is_valid())
            .map(|index| Self::view(model, index, depth))
            .collect();
        TreeSnapshot { metadata, roots }
    }

    fn view<A: TreeIndexAdapter>(model: &A, index: &ModelIndex, remaining: usize) -> TreeNodeView {
        let label = match model.data(index, ItemRole::Display) {
            Some(ItemData::Text(text)) => text,
            _ => String::new(),
        };
        let icon = match model.data(index, ItemRole::Decoration) {
            Some(ItemData::Icon(icon)) => Some(icon.name().to_string()),
            _ => None,
        };
        let color = match model.data(index, ItemRole::Foreground) {
            Some(ItemData::Color(color)) => Some(color),
            _ => None,
        };

        // the cutoff level only asks whether children exist, which the
        // adapter can often answer without resolving them
        let (children, truncated) = if remaining == 0 {
            (Vec::new(), model.has_children(index))
        } else {
            let children = (0..model.row_count(index))
                .map(|row| model.child_address(index, row, 0))
                .filter(|child| child.is_valid())
                .map(|child| Self::view(model, &child, remaining - 1))
                .collect();
            (children, false)
        };

        TreeNodeView {
            label,
            icon,
            color,
            truncated,
            children,
        }
    }
}
