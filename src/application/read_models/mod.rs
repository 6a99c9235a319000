//! Read models for CQRS-lite pattern
//!
//! The explorer session is a live, lazily built structure; a snapshot
//! freezes the part of it that gets rendered.

mod tree_snapshot;
mod tree_snapshot_builder;

pub use tree_snapshot::{SnapshotMetadata, TreeNodeView, TreeSnapshot};
pub use tree_snapshot_builder::TreeSnapshotBuilder;
