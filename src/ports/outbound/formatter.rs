use crate::application::dto::GraphResponse;
use crate::shared::Result;

/// GraphFormatter port for rendering a built graph
///
/// This port abstracts the output representation (rendering-layer JSON,
/// Markdown report, etc.).
pub trait GraphFormatter {
    /// Formats a graph build response
    ///
    /// # Errors
    /// Returns an error if formatting or serialization fails
    fn format(&self, response: &GraphResponse) -> Result<String>;
}
