use crate::shared::Result;

/// OutputPresenter port for presenting the rendered tree
///
/// This port abstracts the output destination (stdout or a file).
pub trait OutputPresenter {
    /// Presents the rendered content
    ///
    /// # Errors
    /// Returns an error if writing to the destination fails
    fn present(&self, content: &str) -> Result<()>;
}
