/// Explorer core - the lazy dependency tree, its index adapter,
/// annotation engine and persistent address stabilizer.
///
/// This layer has no I/O of its own; the package database is reached
/// through the `PackageDatabase` port.
pub mod domain;
pub mod policies;
pub mod services;
