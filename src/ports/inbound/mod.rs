/// Inbound ports (Driving ports) - Use case interfaces
///
/// These ports define the interfaces that external adapters (a tree view,
/// the CLI) use to interact with the application core.
pub mod explore_tree_port;
pub mod tree_index_adapter;

pub use explore_tree_port::ExploreTreePort;
pub use tree_index_adapter::TreeIndexAdapter;
