pub mod color;
pub mod model_index;
pub mod node;
pub mod package;
pub mod reldep;
pub mod workload;

pub use color::Color;
pub use model_index::{ItemData, ItemRole, ModelIndex, NodeId};
pub use node::{
    Category, IconKind, Node, RequirementStrength, RootKind, StableKey, UnderlyingKey,
};
pub use package::{PackageId, PackageRecord, NOARCH, SOURCE_ARCH};
pub use reldep::{compare_evr, compare_version, Comparison, Reldep};
pub use workload::WorkloadDefinition;
