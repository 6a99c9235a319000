use crate::explorer::domain::ModelIndex;
use crate::ports::inbound::TreeIndexAdapter;
use std::collections::{BTreeMap, HashMap};

/// Handle to an address held on behalf of a consumer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PersistentHandle(u64);

/// Outcome counts of one [`PersistentIndexRegistry::stabilize`] run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StabilizeReport {
    pub kept: usize,
    pub remapped: usize,
    pub invalidated: usize,
}

/// Addresses held by consumers across structural changes
///
/// After every structural change, [`stabilize`](Self::stabilize) re-derives
/// each held address against the current tree: kept in place, moved to the
/// new position of an identical node, or invalidated. Root addresses are
/// never touched.
#[derive(Debug, Default)]
pub struct PersistentIndexRegistry {
    next: u64,
    held: BTreeMap<PersistentHandle, ModelIndex>,
}

impl PersistentIndexRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, index: ModelIndex) -> PersistentHandle {
        let handle = PersistentHandle(self.next);
        self.next += 1;
        self.held.insert(handle, index);
        handle
    }

    /// Current address for `handle`; invalid once released or dangling
    pub fn get(&self, handle: PersistentHandle) -> ModelIndex {
        self.held.get(&handle).copied().unwrap_or_default()
    }

    pub fn release(&mut self, handle: PersistentHandle) -> bool {
        self.held.remove(&handle).is_some()
    }

    pub fn len(&self) -> usize {
        self.held.len()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    pub fn stabilize<A: TreeIndexAdapter>(&mut self, model: &A) -> StabilizeReport {
        let mut report = StabilizeReport::default();
        let mut derived: HashMap<ModelIndex, ModelIndex> = HashMap::new();

        for index in self.held.values_mut() {
            if !index.is_valid() || Self::is_root(model, index) {
                continue;
            }
            let current = Self::derive(model, *index, &mut derived);
            if !current.is_valid() {
                report.invalidated += 1;
            } else if current == *index {
                report.kept += 1;
            } else if current.row() == index.row() {
                // same position, node rebound to the current instance
                report.kept += 1;
            } else {
                report.remapped += 1;
            }
            *index = current;
        }

        if report.invalidated > 0 || report.remapped > 0 {
            log::debug!(
                "Stabilized held addresses: {} kept, {} remapped, {} invalidated",
                report.kept,
                report.remapped,
                report.invalidated
            );
        }
        report
    }

    fn is_root<A: TreeIndexAdapter>(model: &A, index: &ModelIndex) -> bool {
        !model.parent_address(index).is_valid()
    }

    /// Re-derives `index` top-down against the current tree
    fn derive<A: TreeIndexAdapter>(
        model: &A,
        index: ModelIndex,
        derived: &mut HashMap<ModelIndex, ModelIndex>,
    ) -> ModelIndex {
        if let Some(current) = derived.get(&index) {
            return *current;
        }

        let parent = model.parent_address(&index);
        let current = if !parent.is_valid() {
            index
        } else {
            let parent = Self::derive(model, parent, derived);
            Self::locate(model, &parent, &index)
        };
        derived.insert(index, current);
        current
    }

    fn locate<A: TreeIndexAdapter>(
        model: &A,
        parent: &ModelIndex,
        held: &ModelIndex,
    ) -> ModelIndex {
        if !parent.is_valid() {
            return ModelIndex::invalid();
        }
        let Some(identity) = model.identity(held) else {
            return ModelIndex::invalid();
        };

        let same_row = model.child_address(parent, held.row(), held.column());
        if model.identity(&same_row).as_ref() == Some(&identity) {
            return same_row;
        }
        (0..model.row_count(parent))
            .map(|row| model.child_address(parent, row, held.column()))
            .find(|candidate| model.identity(candidate).as_ref() == Some(&identity))
            .unwrap_or_default()
    }
}
