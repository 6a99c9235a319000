use crate::application::read_models::TreeSnapshot;
use crate::shared::Result;

/// TreeFormatter port for rendering a tree snapshot
///
/// This port abstracts the output formats (indented text, JSON).
pub trait TreeFormatter {
    /// Renders the snapshot
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, snapshot: &TreeSnapshot) -> Result<String>;
}
