/// ProgressReporter port for user-facing progress
///
/// Progress goes to stderr so it never mixes with the rendered tree.
/// Library diagnostics use the `log` facade instead.
pub trait ProgressReporter {
    /// Reports a one-line status message
    fn report(&self, message: &str);

    /// Reports progress of a phase with a known amount of work
    ///
    /// # Arguments
    /// * `current` - Units done so far
    /// * `total` - Total units of the phase
    /// * `message` - Optional detail for the current unit
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports progress of a phase whose total is unknown, such as an
    /// annotation pass
    ///
    /// # Arguments
    /// * `done` - Units done so far
    /// * `message` - What is being worked on
    fn report_activity(&self, done: usize, message: &str);

    /// Reports a warning; ends any progress display first
    fn report_error(&self, message: &str);

    /// Reports completion of the whole operation
    fn report_completion(&self, message: &str);
}
