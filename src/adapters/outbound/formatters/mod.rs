/// Formatter adapters for report output
pub mod csv;
mod json_formatter;
mod markdown_formatter;

pub use csv::events_to_csv;
pub use json_formatter::JsonFormatter;
pub use markdown_formatter::MarkdownFormatter;
