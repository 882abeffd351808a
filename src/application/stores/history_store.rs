use super::logged;
use crate::planning::domain::{AuditEntry, HistoryKind};
use crate::ports::outbound::HistoryRepository;
use crate::shared::error::ApiError;
use crate::shared::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// HistoryStore holds one audit trail (events or releases)
///
/// Loading failures are not reported: the history panel keeps showing the
/// last entries it got.
pub struct HistoryStore<R: HistoryRepository + 'static> {
    repository: Arc<R>,
    kind: HistoryKind,
    entries: Arc<watch::Sender<Vec<AuditEntry>>>,
}

impl<R: HistoryRepository + 'static> HistoryStore<R> {
    pub fn new(repository: Arc<R>, kind: HistoryKind) -> Self {
        Self {
            repository,
            kind,
            entries: Arc::new(watch::Sender::new(Vec::new())),
        }
    }

    pub fn kind(&self) -> HistoryKind {
        self.kind
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<AuditEntry>> {
        self.entries.subscribe()
    }

    pub fn snapshot(&self) -> Vec<AuditEntry> {
        self.entries.borrow().clone()
    }

    pub async fn load(&self) -> Vec<AuditEntry> {
        fetch(&*self.repository, self.kind, &self.entries).await;
        self.snapshot()
    }

    pub async fn refresh(&self) -> Vec<AuditEntry> {
        self.load().await
    }

    /// Asks the server to undo the change recorded by entry `id`
    pub async fn rollback(&self, id: &str) -> Result<()> {
        logged(
            "rollback history entry",
            self.repository.rollback(self.kind, id).await,
        )?;
        self.load().await;
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        logged("clear history", self.repository.clear(self.kind).await)?;
        self.load().await;
        Ok(())
    }

    /// Refreshes the entries every `interval` until the handle is stopped or dropped
    ///
    /// The first refresh happens immediately. Must be called from within a
    /// tokio runtime. A zero interval is rejected.
    pub fn start_polling(&self, interval: Duration) -> Result<PollHandle> {
        if interval.is_zero() {
            return Err(
                ApiError::validation("interval", "Polling interval must be positive").into(),
            );
        }
        let repository = Arc::clone(&self.repository);
        let entries = Arc::clone(&self.entries);
        let kind = self.kind;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                fetch(&*repository, kind, &entries).await;
            }
        });
        tracing::debug!(resource = kind.resource(), ?interval, "history polling started");

        Ok(PollHandle { task })
    }
}

async fn fetch<R: HistoryRepository + ?Sized>(
    repository: &R,
    kind: HistoryKind,
    entries: &watch::Sender<Vec<AuditEntry>>,
) {
    match repository.list(kind).await {
        Ok(list) => {
            entries.send_replace(list);
        }
        Err(error) => {
            tracing::debug!(resource = kind.resource(), %error, "history refresh failed");
        }
    }
}

/// Stops the history poller when stopped or dropped
#[derive(Debug)]
pub struct PollHandle {
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn stop(self) {
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
