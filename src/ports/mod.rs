/// Ports of the explorer: the tree index adapter and use case a view drives
/// (inbound), and the package database, workload files, console and output
/// the core is driven against (outbound).
pub mod inbound;
pub mod outbound;
