/// Package database adapters
mod in_memory;

pub use in_memory::InMemoryPackageDatabase;
