use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
use crate::application::dto::OutputFormat;
use crate::planning::services::Locale;
use crate::ports::outbound::OutputFormatter;

/// Picks the formatter matching the `--format` flag
pub struct FormatterFactory;

impl FormatterFactory {
    /// The locale only affects Markdown; JSON keeps the API's field names.
    pub fn create(format: OutputFormat, locale: Locale) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Json => Box::new(JsonFormatter::new()),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::with_locale(locale)),
        }
    }
}
