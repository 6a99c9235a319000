/// Outbound adapters - implementations of the outbound ports
pub mod console;
pub mod database;
pub mod filesystem;
pub mod formatters;
