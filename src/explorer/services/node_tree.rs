use super::resolver::DependencyResolver;
use crate::explorer::domain::{
    IconKind, Node, NodeId, RequirementStrength, RootKind, StableKey, UnderlyingKey,
};
use crate::ports::outbound::PackageDatabase;
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

struct NodeSlot {
    node: Node,
    /// Non-owning back-reference; only ever used to walk upward
    parent: Option<NodeId>,
    children: Option<Rc<[NodeId]>>,
    collapsed_children: Option<Rc<[NodeId]>>,
}

impl NodeSlot {
    fn new(node: Node, parent: Option<NodeId>) -> Self {
        Self {
            node,
            parent,
            children: None,
            collapsed_children: None,
        }
    }
}

/// Arena of lazily expanded nodes
///
/// Every slot caches its child lists once: `children` as resolved, and
/// `collapsed_children` with single-provider strong requirements replaced by
/// their provider. The collapse toggle only selects which cache is displayed.
/// Slots are never freed; a rebuilt node simply stops referencing its old
/// children.
pub struct NodeTree<D> {
    resolver: DependencyResolver<D>,
    slots: RefCell<Vec<NodeSlot>>,
    roots: [NodeId; 4],
    collapse_requirements: Cell<bool>,
}

impl<D: PackageDatabase> NodeTree<D> {
    pub fn new(database: D, arches: Vec<String>) -> Self {
        let slots = RootKind::ALL
            .iter()
            .map(|kind| {
                let mut slot = NodeSlot::new(Node::Root(*kind), None);
                slot.children = Some(Rc::from(Vec::new()));
                slot.collapsed_children = Some(Rc::from(Vec::new()));
                slot
            })
            .collect();
        Self {
            resolver: DependencyResolver::new(database, arches),
            slots: RefCell::new(slots),
            roots: [NodeId(0), NodeId(1), NodeId(2), NodeId(3)],
            collapse_requirements: Cell::new(true),
        }
    }

    pub fn arches(&self) -> &[String] {
        self.resolver.arches()
    }

    pub fn database(&self) -> &D {
        self.resolver.database()
    }

    pub fn root(&self, kind: RootKind) -> NodeId {
        self.roots[kind.position()]
    }

    pub fn root_kind(&self, id: NodeId) -> Option<RootKind> {
        RootKind::ALL
            .iter()
            .copied()
            .find(|kind| self.root(*kind) == id)
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn node(&self, id: NodeId) -> Node {
        self.slots.borrow()[id.0].node.clone()
    }

    pub fn label(&self, id: NodeId) -> String {
        self.slots.borrow()[id.0].node.label()
    }

    pub fn icon(&self, id: NodeId) -> Option<IconKind> {
        self.slots.borrow()[id.0].node.icon()
    }

    pub fn autoreplace(&self, id: NodeId) -> bool {
        self.slots.borrow()[id.0].node.autoreplace()
    }

    pub fn underlying_key(&self, id: NodeId) -> UnderlyingKey {
        self.slots.borrow()[id.0].node.underlying_key()
    }

    pub fn stable_key(&self, id: NodeId) -> Option<StableKey> {
        self.slots.borrow()[id.0].node.stable_key()
    }

    pub fn known_has_children(&self, id: NodeId) -> Option<bool> {
        self.slots.borrow()[id.0].node.known_has_children()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots.borrow()[id.0].parent
    }

    pub fn collapse_requirements(&self) -> bool {
        self.collapse_requirements.get()
    }

    /// Selects the displayed accessor for every level at once.
    /// Returns whether the setting changed.
    pub fn set_collapse_requirements(&self, collapse: bool) -> bool {
        self.collapse_requirements.replace(collapse) != collapse
    }

    /// Children as resolved, computed on first access
    pub fn children(&self, id: NodeId) -> Rc<[NodeId]> {
        if let Some(children) = self.slots.borrow()[id.0].children.clone() {
            return children;
        }

        let node = self.node(id);
        let children: Rc<[NodeId]> = self
            .resolver
            .resolve(&node)
            .into_iter()
            .map(|child| self.push(child, Some(id)))
            .collect();
        self.slots.borrow_mut()[id.0].children = Some(children.clone());
        children
    }

    /// Children with single-provider strong requirements replaced by the
    /// provider package, computed on first access
    pub fn collapsed_children(&self, id: NodeId) -> Rc<[NodeId]> {
        if let Some(collapsed) = self.slots.borrow()[id.0].collapsed_children.clone() {
            return collapsed;
        }

        let children = self.children(id);
        let collapsed = if matches!(self.node(id), Node::Package(_)) {
            self.collapse(id, &children)
        } else {
            children
        };
        self.slots.borrow_mut()[id.0].collapsed_children = Some(collapsed.clone());
        collapsed
    }

    /// Children under the current collapse setting
    pub fn displayed_children(&self, id: NodeId) -> Rc<[NodeId]> {
        if self.collapse_requirements() {
            self.collapsed_children(id)
        } else {
            self.children(id)
        }
    }

    /// Displayed children if they have been computed already
    pub fn cached_displayed_children(&self, id: NodeId) -> Option<Rc<[NodeId]>> {
        let slots = self.slots.borrow();
        let slot = &slots[id.0];
        if self.collapse_requirements() {
            slot.collapsed_children.clone()
        } else {
            slot.children.clone()
        }
    }

    /// Replaces the whole child list of a root
    pub fn replace_root_children(&self, kind: RootKind, nodes: Vec<Node>) -> Rc<[NodeId]> {
        let root = self.root(kind);
        let children: Rc<[NodeId]> = nodes
            .into_iter()
            .map(|node| self.push(node, Some(root)))
            .collect();
        self.set_root_children(root, children.clone());
        children
    }

    pub fn append_root_child(&self, kind: RootKind, node: Node) -> NodeId {
        let root = self.root(kind);
        let id = self.push(node, Some(root));
        let mut children = self.children(root).to_vec();
        children.push(id);
        self.set_root_children(root, Rc::from(children));
        id
    }

    /// Drops the cached child lists of a node so they are resolved afresh
    /// on next access. Roots keep their explicitly assigned children.
    pub fn rebuild(&self, id: NodeId) {
        if self.root_kind(id).is_some() {
            return;
        }
        let mut slots = self.slots.borrow_mut();
        let slot = &mut slots[id.0];
        slot.children = None;
        slot.collapsed_children = None;
    }

    fn set_root_children(&self, root: NodeId, children: Rc<[NodeId]>) {
        let mut slots = self.slots.borrow_mut();
        let slot = &mut slots[root.0];
        slot.children = Some(children.clone());
        slot.collapsed_children = Some(children);
    }

    fn push(&self, node: Node, parent: Option<NodeId>) -> NodeId {
        let mut slots = self.slots.borrow_mut();
        slots.push(NodeSlot::new(node, parent));
        NodeId(slots.len() - 1)
    }

    fn collapse(&self, package: NodeId, children: &[NodeId]) -> Rc<[NodeId]> {
        let mut head = Vec::new();
        let mut collapsed: Vec<(String, NodeId)> = Vec::new();
        let mut rest = Vec::new();
        let mut seen: HashSet<UnderlyingKey> = HashSet::new();

        for &child in children {
            match self.node(child) {
                Node::Requirement {
                    strength: RequirementStrength::Strong,
                    ..
                } => {
                    let providers = self.children(child);
                    if let [only] = providers[..] {
                        let provider = self.node(only);
                        if seen.insert(provider.underlying_key()) {
                            let label = provider.label();
                            collapsed.push((label, self.push(provider, Some(package))));
                        }
                    } else {
                        rest.push(child);
                    }
                }
                Node::Requirement { .. } => rest.push(child),
                // build source reference
                _ => head.push(child),
            }
        }

        collapsed.sort_by(|a, b| a.0.cmp(&b.0));
        head.into_iter()
            .chain(collapsed.into_iter().map(|(_, id)| id))
            .chain(rest)
            .collect()
    }
}
