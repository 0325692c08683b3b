/// ProgressReporter port for reporting progress during a graph build
///
/// This port abstracts progress reporting (e.g., to stderr) to give user
/// feedback while lookups are in flight. Implementations are `Send + Sync`
/// because the traversal reports from inside its boxed futures.
pub trait ProgressReporter: Send + Sync {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports discovery progress against the node budget
    ///
    /// # Arguments
    /// * `current` - Nodes discovered so far
    /// * `total` - Node budget of the build
    /// * `message` - Optional message to include (e.g., the asset just added)
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
