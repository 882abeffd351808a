use crate::planning::domain::{AuditEntry, HistoryKind};
use crate::shared::Result;
use async_trait::async_trait;

/// HistoryRepository port for the event and release audit trails
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Entries of the trail, newest first as the server orders them
    async fn list(&self, kind: HistoryKind) -> Result<Vec<AuditEntry>>;

    /// Restores the state recorded before the entry
    async fn rollback(&self, kind: HistoryKind, id: &str) -> Result<()>;

    async fn clear(&self, kind: HistoryKind) -> Result<()>;
}
