mod annotation;
mod node_tree;
mod resolver;
mod session;
mod stabilizer;
mod tree_model;

pub use annotation::{
    AnnotationPass, AnnotationScheduler, ColorBook, Selection, TickOutcome, DEFAULT_BATCH_SIZE,
};
pub use node_tree::NodeTree;
pub use resolver::DependencyResolver;
pub use session::{ExplorerSession, SessionSettings};
pub use stabilizer::{PersistentHandle, PersistentIndexRegistry, StabilizeReport};
pub use tree_model::{TreeModel, MAX_REPLACEMENT_HOPS};
