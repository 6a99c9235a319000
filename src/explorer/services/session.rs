use super::annotation::{
    AnnotationScheduler, ColorBook, Selection, TickOutcome, DEFAULT_BATCH_SIZE,
};
use super::node_tree::NodeTree;
use super::stabilizer::{PersistentHandle, PersistentIndexRegistry, StabilizeReport};
use super::tree_model::TreeModel;
use crate::explorer::domain::{
    Color, ModelIndex, Node, RootKind, StableKey, WorkloadDefinition, NOARCH,
};
use crate::ports::outbound::{PackageDatabase, WorkloadReader};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    pub arches: Vec<String>,
    pub collapse_requirements: bool,
    pub annotation_batch_size: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            arches: vec!["x86_64".to_string(), NOARCH.to_string()],
            collapse_requirements: true,
            annotation_batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// One analyst's browsing state: the node tree, colors, selection and the
/// addresses a view is holding on to
///
/// Every structural change re-stabilizes held addresses and restarts the
/// annotation pass; selection and override changes restart it as well.
/// The pass only advances through [`tick`](Self::tick).
pub struct ExplorerSession<D> {
    tree: NodeTree<D>,
    book: ColorBook,
    selection: Selection,
    scheduler: AnnotationScheduler,
    handles: PersistentIndexRegistry,
}

impl<D: PackageDatabase> ExplorerSession<D> {
    pub fn new(database: D, settings: SessionSettings) -> Self {
        let tree = NodeTree::new(database, settings.arches);
        tree.set_collapse_requirements(settings.collapse_requirements);
        let mut session = Self {
            tree,
            book: ColorBook::default(),
            selection: Selection::default(),
            scheduler: AnnotationScheduler::new(settings.annotation_batch_size),
            handles: PersistentIndexRegistry::new(),
        };
        session.restart_annotation();
        session
    }

    pub fn model(&self) -> TreeModel<'_, D> {
        TreeModel::new(&self.tree, &self.book)
    }

    pub fn tree(&self) -> &NodeTree<D> {
        &self.tree
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn colors(&self) -> &ColorBook {
        &self.book
    }

    pub fn scheduler(&self) -> &AnnotationScheduler {
        &self.scheduler
    }

    /// Replaces the loaded workloads, and with them the label collection
    pub fn load_workloads<R: WorkloadReader>(
        &mut self,
        reader: &R,
        paths: &[PathBuf],
    ) -> Vec<Arc<WorkloadDefinition>> {
        let definitions: Vec<Arc<WorkloadDefinition>> =
            paths.iter().map(|path| reader.read_workload(path)).collect();
        for definition in definitions.iter().filter(|d| d.is_degraded()) {
            log::warn!(
                "Workload {} could not be loaded: {}",
                definition.path.display(),
                definition.degraded.as_deref().unwrap_or_default()
            );
        }

        let labels: BTreeSet<&String> = definitions.iter().flat_map(|d| d.labels.iter()).collect();
        self.tree.replace_root_children(
            RootKind::Labels,
            labels
                .into_iter()
                .map(|name| Node::Label { name: name.clone() })
                .collect(),
        );
        self.tree.replace_root_children(
            RootKind::Sources,
            definitions.iter().cloned().map(Node::Workload).collect(),
        );
        self.structural_change();
        definitions
    }

    /// Adds a free-text subject to the workset
    pub fn add_subject(&mut self, text: &str) -> ModelIndex {
        self.add_to_workset(Node::Subject {
            text: text.to_string(),
        })
    }

    /// Adds an exact-name lookup over the configured architectures
    pub fn add_query(&mut self, name: &str) -> ModelIndex {
        self.add_to_workset(Node::Query {
            name: name.to_string(),
            arches: self.tree.arches().to_vec(),
        })
    }

    /// Adds the reverse edge: packages requiring `reldep`
    pub fn add_what_requires(&mut self, reldep: &str) -> ModelIndex {
        self.add_to_workset(Node::Provide {
            reldep: reldep.to_string(),
        })
    }

    pub fn set_collapse_requirements(&mut self, collapse: bool) {
        if self.tree.set_collapse_requirements(collapse) {
            self.structural_change();
        }
    }

    pub fn set_active_label(&mut self, label: Option<String>) {
        if self.selection.active_label != label {
            self.selection.active_label = label;
            self.restart_annotation();
        }
    }

    pub fn set_active_workload(&mut self, workload: Option<String>) {
        if self.selection.active_workload != workload {
            self.selection.active_workload = workload;
            self.restart_annotation();
        }
    }

    pub fn set_override(&mut self, key: StableKey, color: Color) {
        if self.book.set_override(key, color) != Some(color) {
            self.sync_modifications();
        }
    }

    pub fn clear_override(&mut self, key: &StableKey) -> bool {
        let removed = self.book.clear_override(key).is_some();
        if removed {
            self.sync_modifications();
        }
        removed
    }

    pub fn clear_overrides(&mut self) {
        if !self.book.overrides().is_empty() {
            self.book.clear_overrides();
            self.sync_modifications();
        }
    }

    /// Re-resolves the node shown at `index`
    pub fn refresh(&mut self, index: &ModelIndex) -> bool {
        let Some(id) = self.model().effective_node(index) else {
            return false;
        };
        self.tree.rebuild(id);
        self.structural_change();
        true
    }

    pub fn hold(&mut self, index: ModelIndex) -> PersistentHandle {
        self.handles.register(index)
    }

    pub fn held(&self, handle: PersistentHandle) -> ModelIndex {
        self.handles.get(handle)
    }

    pub fn release(&mut self, handle: PersistentHandle) -> bool {
        self.handles.release(handle)
    }

    /// Advances the live annotation pass by one batch
    pub fn tick(&mut self) -> TickOutcome {
        self.scheduler
            .tick(&self.tree, &mut self.book, &self.selection)
    }

    /// Ticks until no pass is live; returns the number of ticks taken
    pub fn run_annotation_to_completion(&mut self) -> usize {
        let mut ticks = 0;
        while self.scheduler.is_live() {
            self.tick();
            ticks += 1;
        }
        ticks
    }

    pub fn color_of(&self, index: &ModelIndex) -> Option<Color> {
        let id = self.model().effective_node(index)?;
        self.book.color_for(&self.tree.node(id))
    }

    fn add_to_workset(&mut self, node: Node) -> ModelIndex {
        let id = self.tree.append_root_child(RootKind::Workset, node);
        self.structural_change();
        let row = self.tree.children(self.tree.root(RootKind::Workset)).len() - 1;
        ModelIndex::new(row, 0, id)
    }

    /// Rebuilds the modifications collection from the override registry
    fn sync_modifications(&mut self) {
        let mods = self
            .book
            .overrides()
            .iter()
            .map(|(key, color)| Node::Mod {
                key: key.clone(),
                color: *color,
            })
            .collect();
        self.tree.replace_root_children(RootKind::Modifications, mods);
        self.structural_change();
    }

    fn structural_change(&mut self) -> StabilizeReport {
        let model = TreeModel::new(&self.tree, &self.book);
        let report = self.handles.stabilize(&model);
        self.restart_annotation();
        report
    }

    fn restart_annotation(&mut self) {
        self.scheduler.restart(&mut self.book);
    }
}
