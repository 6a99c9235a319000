use crate::explorer::domain::{ItemData, ItemRole, ModelIndex, UnderlyingKey};

/// TreeIndexAdapter - inbound port consumed by tree views
///
/// Translates between `(row, column, parent)` positions and nodes of the
/// lazily built dependency tree. Every operation answers for the *effective*
/// node of an address, i.e. after single-child collapsing. Invalid input
/// yields the invalid address (or zero / `None`), never a panic.
pub trait TreeIndexAdapter {
    /// Number of displayed children below `parent`; 0 for the invalid address
    fn row_count(&self, parent: &ModelIndex) -> usize;

    /// Number of columns; the tree has exactly one
    fn column_count(&self, parent: &ModelIndex) -> usize;

    /// Whether `parent` has children, answered without resolving the
    /// children of non-collapsible nodes when possible
    fn has_children(&self, parent: &ModelIndex) -> bool;

    /// Address of the child at `row`/`column` below `parent`, or the invalid
    /// address when out of bounds
    fn child_address(&self, parent: &ModelIndex, row: usize, column: usize) -> ModelIndex;

    /// Address of the displayed parent; invalid for roots
    fn parent_address(&self, index: &ModelIndex) -> ModelIndex;

    /// Label, icon or color of the addressed node
    fn data(&self, index: &ModelIndex, role: ItemRole) -> Option<ItemData>;

    /// Identity of the addressed node that survives recomputation
    fn identity(&self, index: &ModelIndex) -> Option<UnderlyingKey>;
}
