use super::annotation::ColorBook;
use super::node_tree::NodeTree;
use crate::explorer::domain::{
    ItemData, ItemRole, ModelIndex, NodeId, RootKind, UnderlyingKey,
};
use crate::ports::inbound::TreeIndexAdapter;
use crate::ports::outbound::PackageDatabase;

/// Upper bound on sole-child replacement hops for one address
pub const MAX_REPLACEMENT_HOPS: usize = 64;

/// Collapse-aware tree index adapter over a [`NodeTree`]
///
/// An address denotes the node it was created for; every read goes through
/// the *effective* node, found by following the sole displayed child of
/// autoreplace nodes.
pub struct TreeModel<'a, D> {
    tree: &'a NodeTree<D>,
    book: &'a ColorBook,
}

impl<'a, D: PackageDatabase> TreeModel<'a, D> {
    pub fn new(tree: &'a NodeTree<D>, book: &'a ColorBook) -> Self {
        Self { tree, book }
    }

    pub fn tree(&self) -> &'a NodeTree<D> {
        self.tree
    }

    pub fn root_index(&self, kind: RootKind) -> ModelIndex {
        ModelIndex::new(kind.position(), 0, self.tree.root(kind))
    }

    pub fn root_indexes(&self) -> Vec<ModelIndex> {
        RootKind::ALL
            .iter()
            .map(|kind| self.root_index(*kind))
            .collect()
    }

    /// The node actually shown for `id`
    pub fn effective(&self, id: NodeId) -> NodeId {
        let mut current = id;
        for _ in 0..MAX_REPLACEMENT_HOPS {
            if !self.tree.autoreplace(current) {
                break;
            }
            match self.tree.displayed_children(current)[..] {
                [only] => current = only,
                _ => break,
            }
        }
        current
    }

    pub fn effective_node(&self, index: &ModelIndex) -> Option<NodeId> {
        index.node().map(|id| self.effective(id))
    }

    fn row_of(&self, id: NodeId) -> usize {
        match self.tree.parent(id) {
            None => self
                .tree
                .root_kind(id)
                .map(|kind| kind.position())
                .unwrap_or(0),
            Some(parent) => self
                .tree
                .displayed_children(parent)
                .iter()
                .position(|sibling| *sibling == id)
                // stale address: the row is only a hint
                .unwrap_or(0),
        }
    }
}

impl<D: PackageDatabase> TreeIndexAdapter for TreeModel<'_, D> {
    fn row_count(&self, index: &ModelIndex) -> usize {
        match self.effective_node(index) {
            Some(id) => self.tree.displayed_children(id).len(),
            None => 0,
        }
    }

    fn column_count(&self, _index: &ModelIndex) -> usize {
        1
    }

    fn has_children(&self, index: &ModelIndex) -> bool {
        let Some(id) = index.node() else {
            return false;
        };
        // resolving an autoreplace node is unavoidable, anything else is
        // answered from caches or the node's own data when possible
        let id = self.effective(id);
        if let Some(children) = self.tree.cached_displayed_children(id) {
            return !children.is_empty();
        }
        self.tree.known_has_children(id).unwrap_or(true)
    }

    fn child_address(&self, parent: &ModelIndex, row: usize, column: usize) -> ModelIndex {
        if column != 0 {
            return ModelIndex::invalid();
        }
        let Some(id) = self.effective_node(parent) else {
            return ModelIndex::invalid();
        };
        match self.tree.displayed_children(id).get(row) {
            Some(child) => ModelIndex::new(row, 0, *child),
            None => ModelIndex::invalid(),
        }
    }

    fn parent_address(&self, index: &ModelIndex) -> ModelIndex {
        let Some(id) = index.node() else {
            return ModelIndex::invalid();
        };
        let Some(shown) = self.tree.parent(id) else {
            return ModelIndex::invalid();
        };

        // climb past ancestors that merely stand in for `shown`
        let mut current = shown;
        while let Some(parent) = self.tree.parent(current) {
            if self.effective(parent) != shown {
                break;
            }
            current = parent;
        }
        ModelIndex::new(self.row_of(current), 0, current)
    }

    fn data(&self, index: &ModelIndex, role: ItemRole) -> Option<ItemData> {
        let id = self.effective_node(index)?;
        match role {
            ItemRole::Display => Some(ItemData::Text(self.tree.label(id))),
            ItemRole::Decoration => self.tree.icon(id).map(ItemData::Icon),
            ItemRole::Foreground => self
                .book
                .color_for(&self.tree.node(id))
                .map(ItemData::Color),
        }
    }

    fn identity(&self, index: &ModelIndex) -> Option<UnderlyingKey> {
        index.node().map(|id| self.tree.underlying_key(id))
    }
}
