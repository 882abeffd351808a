//! Terminal rendering of notifications, confirmations and loading state

mod prompt;
mod spinner;
mod toast_renderer;

pub use prompt::ConsolePrompt;
pub use spinner::LoadingSpinner;
pub use toast_renderer::ConsoleToastRenderer;
