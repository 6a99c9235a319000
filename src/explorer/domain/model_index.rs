use super::color::Color;
use super::node::IconKind;

/// Handle of a node inside the node tree arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// An address in the displayed tree: a row hint plus the addressed node.
///
/// The row is advisory sibling bookkeeping; the node (and its parent chain)
/// is what the address denotes. The default value is the invalid address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModelIndex {
    row: usize,
    column: usize,
    node: Option<NodeId>,
}

impl ModelIndex {
    pub(crate) fn new(row: usize, column: usize, node: NodeId) -> Self {
        Self {
            row,
            column,
            node: Some(node),
        }
    }

    pub fn invalid() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.node.is_some()
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn node(&self) -> Option<NodeId> {
        self.node
    }
}

/// What a consumer asks [`data`](crate::ports::inbound::TreeIndexAdapter::data) for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemRole {
    Display,
    Decoration,
    Foreground,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemData {
    Text(String),
    Icon(IconKind),
    Color(Color),
}
