//! Incremental node coloring.
//!
//! Colors come from two places: explicit overrides keyed by [`StableKey`],
//! which always win, and a computed map keyed by [`UnderlyingKey`], filled
//! by an [`AnnotationPass`]. The pass is a resumable task whose cursor is an
//! explicit stack, advanced a bounded number of steps per scheduler tick.

use super::node_tree::NodeTree;
use crate::explorer::domain::{Color, Node, NodeId, RootKind, StableKey, UnderlyingKey};
use crate::explorer::policies::{WorkloadCandidate, WorkloadPriority};
use crate::ports::outbound::PackageDatabase;
use std::collections::{BTreeMap, HashMap};

/// Default number of steps performed per tick
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Override and computed colors
#[derive(Debug, Default, Clone)]
pub struct ColorBook {
    overrides: BTreeMap<StableKey, Color>,
    computed: HashMap<UnderlyingKey, Color>,
    previous: HashMap<UnderlyingKey, Color>,
}

impl ColorBook {
    pub fn color_for(&self, node: &Node) -> Option<Color> {
        if let Some(color) = node
            .stable_key()
            .and_then(|key| self.overrides.get(&key).copied())
        {
            return Some(color);
        }
        self.computed.get(&node.underlying_key()).copied()
    }

    pub fn computed_color(&self, key: &UnderlyingKey) -> Option<Color> {
        self.computed.get(key).copied()
    }

    /// Color the key had in the last completed pass
    pub fn previous_color(&self, key: &UnderlyingKey) -> Option<Color> {
        self.previous.get(key).copied()
    }

    pub fn computed(&self) -> &HashMap<UnderlyingKey, Color> {
        &self.computed
    }

    pub fn overrides(&self) -> &BTreeMap<StableKey, Color> {
        &self.overrides
    }

    /// Returns the replaced override, if any
    pub fn set_override(&mut self, key: StableKey, color: Color) -> Option<Color> {
        self.overrides.insert(key, color)
    }

    pub fn clear_override(&mut self, key: &StableKey) -> Option<Color> {
        self.overrides.remove(key)
    }

    pub fn clear_overrides(&mut self) {
        self.overrides.clear();
    }

    /// First assignment wins; returns whether the key was newly colored
    pub fn assign(&mut self, key: UnderlyingKey, color: Color) -> bool {
        match self.computed.entry(key) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(color);
                true
            }
        }
    }

    /// Clears the computed map for a new pass. A cancelled pass leaves a
    /// partial map, which must not replace the last complete one.
    fn begin_pass(&mut self, cancelled: bool) {
        if cancelled {
            self.computed.clear();
        } else {
            self.previous = std::mem::take(&mut self.computed);
        }
    }
}

/// The label and workload the analyst has selected
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    pub active_label: Option<String>,
    /// Matched against a workload's display name or its file path
    pub active_workload: Option<String>,
}

impl Selection {
    pub fn is_active_label(&self, node: &Node) -> bool {
        self.active_label
            .as_deref()
            .is_some_and(|active| node.is_label(active))
    }

    pub fn is_active_workload(&self, node: &Node) -> bool {
        let (Some(active), Node::Workload(definition)) = (self.active_workload.as_deref(), node)
        else {
            return false;
        };
        definition.display_name() == active || definition.path.to_string_lossy() == active
    }
}

#[derive(Debug, Clone, Copy)]
enum Step {
    Labels,
    Workloads,
    Workload(NodeId),
    Subject { id: NodeId, color: Color, sources: bool },
    Package { id: NodeId, color: Color, sources: bool },
    /// Colors the node and every package it resolves to
    Source { id: NodeId, color: Color },
    Paint { id: NodeId, color: Color },
}

/// A resumable computed-coloring pass
#[derive(Debug)]
pub struct AnnotationPass {
    stack: Vec<Step>,
    steps: usize,
    assigned: usize,
}

impl Default for AnnotationPass {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationPass {
    pub fn new() -> Self {
        Self {
            // popped from the end: labels first
            stack: vec![Step::Workloads, Step::Labels],
            steps: 0,
            assigned: 0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.stack.is_empty()
    }

    /// Steps performed so far
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Keys newly colored so far
    pub fn assigned(&self) -> usize {
        self.assigned
    }

    /// Performs at most `budget` steps; returns whether the pass finished
    pub fn advance<D: PackageDatabase>(
        &mut self,
        tree: &NodeTree<D>,
        book: &mut ColorBook,
        selection: &Selection,
        budget: usize,
    ) -> bool {
        for _ in 0..budget {
            let Some(step) = self.stack.pop() else {
                break;
            };
            self.steps += 1;
            self.run(step, tree, book, selection);
        }
        self.is_finished()
    }

    fn run<D: PackageDatabase>(
        &mut self,
        step: Step,
        tree: &NodeTree<D>,
        book: &mut ColorBook,
        selection: &Selection,
    ) {
        match step {
            Step::Labels => {
                let labels = tree.children(tree.root(RootKind::Labels));
                self.push_all(labels.iter().map(|&id| {
                    let color = if selection.is_active_label(&tree.node(id)) {
                        Color::Active
                    } else {
                        Color::Inactive
                    };
                    Step::Paint { id, color }
                }));
            }
            Step::Workloads => {
                let ordered = Self::workload_order(tree, book, selection);
                self.push_all(ordered.into_iter().map(|c| Step::Workload(c.id)));
            }
            Step::Workload(id) => self.workload(id, tree, selection),
            Step::Subject { id, color, sources } => {
                self.paint(tree, book, id, color);
                let packages = tree.children(id);
                self.push_all(
                    packages
                        .iter()
                        .map(|&id| Step::Package { id, color, sources }),
                );
            }
            Step::Package { id, color, sources } => {
                self.paint(tree, book, id, color);
                if sources && matches!(tree.node(id), Node::Package(ref pkg) if pkg.source_name.is_some())
                {
                    if let Some(&source) = tree.children(id).first() {
                        self.stack.push(Step::Source { id: source, color });
                    }
                }
            }
            Step::Source { id, color } => {
                self.paint(tree, book, id, color);
                let packages = tree.children(id);
                self.push_all(packages.iter().map(|&id| Step::Paint { id, color }));
            }
            Step::Paint { id, color } => self.paint(tree, book, id, color),
        }
    }

    fn workload<D: PackageDatabase>(
        &mut self,
        id: NodeId,
        tree: &NodeTree<D>,
        selection: &Selection,
    ) {
        let children = tree.children(id);
        let has_active_label = children
            .iter()
            .any(|&child| selection.is_active_label(&tree.node(child)));
        if !has_active_label {
            self.stack.push(Step::Paint {
                id,
                color: Color::Inactive,
            });
            return;
        }

        let (own, wanted) = if selection.is_active_workload(&tree.node(id)) {
            (Color::Active, Color::Active)
        } else {
            (Color::Selected, Color::SelectedDependency)
        };

        let descent: Vec<Step> = children
            .iter()
            .filter_map(|&child| match tree.node(child) {
                Node::UnwantedSubject { .. } => Some(Step::Subject {
                    id: child,
                    color: Color::Unwanted,
                    sources: false,
                }),
                Node::Subject { .. } => Some(Step::Subject {
                    id: child,
                    color: wanted,
                    sources: true,
                }),
                _ => None,
            })
            .collect();
        self.push_all(descent);
        self.stack.push(Step::Paint { id, color: own });
    }

    fn workload_order<D: PackageDatabase>(
        tree: &NodeTree<D>,
        book: &ColorBook,
        selection: &Selection,
    ) -> Vec<WorkloadCandidate> {
        let candidates = tree
            .children(tree.root(RootKind::Sources))
            .iter()
            .filter_map(|&id| match tree.node(id) {
                Node::Workload(definition) => {
                    let node = Node::Workload(definition.clone());
                    let sticky = selection.is_active_workload(&node)
                        || book.previous_color(&node.underlying_key()) == Some(Color::Active);
                    let has_active_label = selection
                        .active_label
                        .as_ref()
                        .is_some_and(|active| definition.labels.contains(active));
                    Some(WorkloadCandidate {
                        id,
                        sticky,
                        has_active_label,
                        has_unwanted: definition.has_unwanted(),
                        child_count: tree.children(id).len(),
                    })
                }
                _ => None,
            })
            .collect();
        WorkloadPriority::order(candidates)
    }

    /// Pushes steps so that they run in iteration order
    fn push_all(&mut self, steps: impl IntoIterator<Item = Step>) {
        let steps: Vec<Step> = steps.into_iter().collect();
        self.stack.extend(steps.into_iter().rev());
    }

    fn paint<D: PackageDatabase>(
        &mut self,
        tree: &NodeTree<D>,
        book: &mut ColorBook,
        id: NodeId,
        color: Color,
    ) {
        if book.assign(tree.underlying_key(id), color) {
            self.assigned += 1;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// No pass is live
    Idle,
    /// The live pass has work left
    Pending,
    /// The live pass completed during this tick
    Finished,
}

/// Keeps at most one live [`AnnotationPass`] and steps it in batches
#[derive(Debug)]
pub struct AnnotationScheduler {
    batch_size: usize,
    generation: u64,
    live: Option<AnnotationPass>,
}

impl Default for AnnotationScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}

impl AnnotationScheduler {
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            generation: 0,
            live: None,
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Number of passes started so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    /// Discards the live pass, if any, and starts a fresh one
    pub fn restart(&mut self, book: &mut ColorBook) {
        let cancelled = self.live.take();
        if let Some(pass) = &cancelled {
            log::debug!(
                "Cancelling annotation pass {} after {} steps",
                self.generation,
                pass.steps()
            );
        }
        book.begin_pass(cancelled.is_some());
        self.generation += 1;
        self.live = Some(AnnotationPass::new());
    }

    pub fn tick<D: PackageDatabase>(
        &mut self,
        tree: &NodeTree<D>,
        book: &mut ColorBook,
        selection: &Selection,
    ) -> TickOutcome {
        let Some(pass) = self.live.as_mut() else {
            return TickOutcome::Idle;
        };
        if pass.advance(tree, book, selection, self.batch_size) {
            log::debug!(
                "Annotation pass {} finished: {} steps, {} keys colored",
                self.generation,
                pass.steps(),
                pass.assigned()
            );
            self.live = None;
            TickOutcome::Finished
        } else {
            TickOutcome::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::database::InMemoryPackageDatabase;
    use crate::explorer::domain::{PackageRecord, WorkloadDefinition};
    use std::sync::Arc;

    fn tree() -> NodeTree<InMemoryPackageDatabase> {
        NodeTree::new(
            InMemoryPackageDatabase::new(vec![
                PackageRecord::new("python3-scipy", "1.5.2", "2", "x86_64").with_source("scipy"),
                PackageRecord::new("scipy", "1.5.2", "2", "src"),
                PackageRecord::new("texlive", "2020", "1", "noarch"),
                PackageRecord::new("bash", "5.0", "1", "x86_64"),
            ]),
            vec!["x86_64".to_string(), "noarch".to_string()],
        )
    }

    fn workload(path: &str, labels: &[&str], packages: &[&str], unwanted: &[&str]) -> Node {
        let mut wl = WorkloadDefinition::new(path);
        wl.labels = labels.iter().map(|s| s.to_string()).collect();
        wl.packages = packages.iter().map(|s| s.to_string()).collect();
        wl.unwanted_packages = unwanted.iter().map(|s| s.to_string()).collect();
        Node::Workload(Arc::new(wl))
    }

    fn load(tree: &NodeTree<InMemoryPackageDatabase>, workloads: Vec<Node>) {
        tree.replace_root_children(RootKind::Sources, workloads);
        tree.replace_root_children(
            RootKind::Labels,
            vec![Node::Label { name: "c9s".into() }, Node::Label { name: "eln".into() }],
        );
    }

    fn run(tree: &NodeTree<InMemoryPackageDatabase>, book: &mut ColorBook, selection: &Selection) {
        let mut scheduler = AnnotationScheduler::new(3);
        scheduler.restart(book);
        while scheduler.tick(tree, book, selection) == TickOutcome::Pending {}
    }

    fn package_key(name: &str, evr: &str, arch: &str) -> UnderlyingKey {
        let (version, release) = evr.split_once('-').unwrap();
        UnderlyingKey::Package(PackageRecord::new(name, version, release, arch).id())
    }

    fn selection(label: &str, workload: Option<&str>) -> Selection {
        Selection {
            active_label: Some(label.to_string()),
            active_workload: workload.map(str::to_string),
        }
    }

    #[test]
    fn test_labels_colored_by_activity() {
        let tree = tree();
        load(&tree, vec![]);
        let mut book = ColorBook::default();
        run(&tree, &mut book, &selection("eln", None));

        assert_eq!(
            book.color_for(&Node::Label { name: "eln".into() }),
            Some(Color::Active)
        );
        assert_eq!(
            book.color_for(&Node::Label { name: "c9s".into() }),
            Some(Color::Inactive)
        );
    }

    #[test]
    fn test_active_workload_propagates_active_color() {
        let tree = tree();
        let scipy = workload("scipy.yaml", &["eln"], &["python3-scipy"], &["texlive"]);
        let other = workload("shell.yaml", &["c9s"], &["bash"], &[]);
        load(&tree, vec![scipy.clone(), other.clone()]);
        let mut book = ColorBook::default();
        run(&tree, &mut book, &selection("eln", Some("scipy")));

        assert_eq!(book.color_for(&scipy), Some(Color::Active));
        assert_eq!(book.color_for(&other), Some(Color::Inactive));
        assert_eq!(
            book.computed_color(&package_key("python3-scipy", "1.5.2-2", "x86_64")),
            Some(Color::Active)
        );
        // build source follows the binary package
        assert_eq!(
            book.computed_color(&package_key("scipy", "1.5.2-2", "src")),
            Some(Color::Active)
        );
        assert_eq!(
            book.computed_color(&package_key("texlive", "2020-1", "noarch")),
            Some(Color::Unwanted)
        );
        // not descended
        assert_eq!(book.computed_color(&package_key("bash", "5.0-1", "x86_64")), None);
    }

    #[test]
    fn test_selected_workload_uses_dependency_color() {
        let tree = tree();
        let scipy = workload("scipy.yaml", &["eln"], &["python3-scipy"], &[]);
        load(&tree, vec![scipy.clone()]);
        let mut book = ColorBook::default();
        run(&tree, &mut book, &selection("eln", None));

        assert_eq!(book.color_for(&scipy), Some(Color::Selected));
        assert_eq!(
            book.computed_color(&package_key("python3-scipy", "1.5.2-2", "x86_64")),
            Some(Color::SelectedDependency)
        );
    }

    #[test]
    fn test_first_assignment_wins() {
        let tree = tree();
        // the unwanted declaration is visited first because it has unwanted entries
        let a = workload("a.yaml", &["eln"], &["bash"], &[]);
        let b = workload("b.yaml", &["eln"], &[], &["bash"]);
        load(&tree, vec![a, b]);
        let mut book = ColorBook::default();
        run(&tree, &mut book, &selection("eln", None));

        assert_eq!(
            book.computed_color(&package_key("bash", "5.0-1", "x86_64")),
            Some(Color::Unwanted)
        );
    }

    #[test]
    fn test_override_wins() {
        let tree = tree();
        load(&tree, vec![]);
        let mut book = ColorBook::default();
        book.set_override(StableKey::Label("eln".into()), Color::Rgb(1, 2, 3));
        run(&tree, &mut book, &selection("eln", None));

        let eln = Node::Label { name: "eln".into() };
        assert_eq!(book.color_for(&eln), Some(Color::Rgb(1, 2, 3)));
        assert_eq!(book.computed_color(&eln.underlying_key()), Some(Color::Active));

        book.clear_override(&StableKey::Label("eln".into()));
        assert_eq!(book.color_for(&eln), Some(Color::Active));
    }

    #[test]
    fn test_two_passes_are_idempotent() {
        let tree = tree();
        load(
            &tree,
            vec![
                workload("scipy.yaml", &["eln"], &["python3-scipy"], &["texlive"]),
                workload("shell.yaml", &["c9s"], &["bash"], &[]),
            ],
        );
        let mut book = ColorBook::default();
        let selection = selection("eln", Some("scipy"));
        run(&tree, &mut book, &selection);
        let first = book.computed().clone();
        run(&tree, &mut book, &selection);
        assert_eq!(&first, book.computed());
    }

    #[test]
    fn test_restart_discards_live_pass() {
        let tree = tree();
        load(&tree, vec![workload("scipy.yaml", &["eln"], &["python3-scipy"], &[])]);
        let mut book = ColorBook::default();
        let selection = selection("eln", None);
        let mut scheduler = AnnotationScheduler::new(1);

        assert_eq!(scheduler.tick(&tree, &mut book, &selection), TickOutcome::Idle);
        scheduler.restart(&mut book);
        assert_eq!(scheduler.tick(&tree, &mut book, &selection), TickOutcome::Pending);
        assert_eq!(scheduler.generation(), 1);

        scheduler.restart(&mut book);
        assert_eq!(scheduler.generation(), 2);
        assert!(scheduler.is_live());
        assert!(book.computed().is_empty());

        let mut ticks = 0;
        while scheduler.tick(&tree, &mut book, &selection) == TickOutcome::Pending {
            ticks += 1;
        }
        assert!(ticks > 1);
        assert!(!scheduler.is_live());
    }

    #[test]
    fn test_cancelled_pass_keeps_sticky_priority() {
        let bash = package_key("bash", "5.0-1", "x86_64");
        let active = selection("eln", Some("w2.yaml"));
        let released = selection("eln", None);
        let setup = || {
            let tree = tree();
            load(
                &tree,
                vec![
                    workload("w1.yaml", &["eln"], &[], &["bash"]),
                    workload("w2.yaml", &["eln"], &["bash"], &[]),
                ],
            );
            let mut book = ColorBook::default();
            run(&tree, &mut book, &active);
            assert_eq!(book.computed_color(&bash), Some(Color::Active));
            (tree, book)
        };

        let (tree, mut direct) = setup();
        run(&tree, &mut direct, &released);

        let (tree, mut book) = setup();
        let mut scheduler = AnnotationScheduler::new(1);
        scheduler.restart(&mut book);
        assert_eq!(scheduler.tick(&tree, &mut book, &released), TickOutcome::Pending);
        scheduler.restart(&mut book);
        while scheduler.tick(&tree, &mut book, &released) == TickOutcome::Pending {}

        assert_eq!(direct.computed_color(&bash), Some(Color::SelectedDependency));
        assert_eq!(book.computed_color(&bash), direct.computed_color(&bash));
        assert_eq!(book.computed(), direct.computed());
    }

    #[test]
    fn test_batch_bounds_steps_per_tick() {
        let tree = tree();
        load(&tree, vec![]);
        let mut book = ColorBook::default();
        let mut pass = AnnotationPass::new();
        assert!(!pass.advance(&tree, &mut book, &Selection::default(), 1));
        assert_eq!(pass.steps(), 1);
        assert!(pass.advance(&tree, &mut book, &Selection::default(), 50));
        assert_eq!(pass.steps(), 4);
    }

    #[test]
    fn test_workload_matched_by_path() {
        let selection = Selection {
            active_label: None,
            active_workload: Some("/srv/wl/scipy.yaml".into()),
        };
        assert!(selection.is_active_workload(&workload("/srv/wl/scipy.yaml", &[], &[], &[])));
        assert!(!selection.is_active_workload(&workload("/srv/wl/other.yaml", &[], &[], &[])));
    }
}
