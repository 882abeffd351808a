/// Data transfer objects exchanged between the CLI and the application layer
mod auth_outcome;
mod output_format;

pub use auth_outcome::AuthOutcome;
pub use output_format::{ExportFormat, OutputFormat};
