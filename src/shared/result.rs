/// Result alias used across the crate; errors are `anyhow::Error` values
/// that usually wrap an [`ExplorerError`](super::error::ExplorerError).
pub type Result<T> = std::result::Result<T, anyhow::Error>;
