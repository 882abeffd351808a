//! Notification and confirmation state shared by the commands

mod confirmation_service;
mod error_reporter;
mod toast_service;

pub use confirmation_service::{ConfirmationOptions, ConfirmationService};
pub use error_reporter::{ErrorReporter, Reported, NETWORK_DEBOUNCE};
pub use toast_service::{Toast, ToastKind, ToastService, DEFAULT_DURATION, ERROR_DURATION};
