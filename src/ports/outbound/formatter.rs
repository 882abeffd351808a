use crate::application::read_models::Report;
use crate::shared::Result;

/// OutputFormatter port for rendering command results
///
/// This port abstracts the output format (JSON, Markdown) used to present
/// any read model the CLI produces.
pub trait OutputFormatter {
    /// Renders a report
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, report: &Report<'_>) -> Result<String>;
}
