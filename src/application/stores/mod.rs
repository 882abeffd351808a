//! State containers
//!
//! Each store keeps the last snapshot fetched from the planning API in a
//! `tokio::sync::watch` channel. Mutations send one request and then re-fetch
//! the whole collection; nothing is merged locally.

mod auth_service;
mod event_store;
mod filter_state;
mod game_store;
mod history_store;
mod onboarding_store;
mod release_note_store;
mod release_store;
mod schedule_stores;
mod settings_store;

pub use auth_service::AuthService;
pub use event_store::EventStore;
pub use filter_state::FilterState;
pub use game_store::GameStore;
pub use history_store::{HistoryStore, PollHandle, DEFAULT_POLL_INTERVAL};
pub use onboarding_store::OnboardingStore;
pub use release_note_store::{MicroserviceStore, ReleaseNoteStore};
pub use release_store::ReleaseStore;
pub use schedule_stores::{AbsenceStore, ClosedDayStore, SprintStore};
pub use settings_store::SettingsStore;

use crate::shared::error::ApiError;
use crate::shared::Result;

/// Logs a failed store operation and hands the result back unchanged
pub(crate) fn logged<T>(operation: &str, result: Result<T>) -> Result<T> {
    if let Err(error) = &result {
        match error.downcast_ref::<ApiError>() {
            Some(ApiError::Validation { .. }) => {
                tracing::debug!(operation, %error, "rejected before sending")
            }
            Some(ApiError::PermissionDenied { .. }) => {
                tracing::warn!(operation, %error, "permission denied")
            }
            _ => tracing::error!(operation, %error, "store operation failed"),
        }
    }
    result
}
