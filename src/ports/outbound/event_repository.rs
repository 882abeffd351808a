use crate::planning::domain::{Event, EventDraft};
use crate::shared::Result;
use async_trait::async_trait;

/// EventRepository port for the `/events` resource
///
/// Implementations do not validate drafts; callers run
/// `EventDraft::validated` before handing them over.
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Event>>;

    async fn get(&self, id: &str) -> Result<Event>;

    async fn create(&self, draft: &EventDraft) -> Result<Event>;

    async fn update(&self, id: &str, draft: &EventDraft) -> Result<Event>;

    async fn delete(&self, id: &str) -> Result<()>;

    /// Creates all drafts in one request
    async fn bulk_import(&self, drafts: &[EventDraft]) -> Result<()>;

    /// Deletes every event visible to the user
    async fn clear_all(&self) -> Result<()>;
}
