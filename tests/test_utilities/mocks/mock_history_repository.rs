use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use event_planner::prelude::*;

/// HistoryRepository whose entries can be changed while a poller runs
#[derive(Clone, Default)]
pub struct MockHistoryRepository {
    pub entries: Arc<Mutex<Vec<AuditEntry>>>,
    pub list_calls: Arc<AtomicUsize>,
    pub rolled_back: Arc<Mutex<Vec<String>>>,
}

impl MockHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, id: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(0, AuditEntry::Event(entry(id)));
    }

    pub fn list_count(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

pub fn entry(id: &str) -> HistoryEntry {
    HistoryEntry {
        id: id.to_string(),
        action: HistoryAction::Create,
        event_id: Some(format!("ev-{}", id)),
        event_data: None,
        previous_data: None,
        user_id: Some("u1".to_string()),
        user_display_name: Some("Jane D.".to_string()),
        timestamp: "2025-03-01T10:00:00Z".to_string(),
    }
}

#[async_trait::async_trait]
impl HistoryRepository for MockHistoryRepository {
    async fn list(&self, _kind: HistoryKind) -> Result<Vec<AuditEntry>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn rollback(&self, _kind: HistoryKind, id: &str) -> Result<()> {
        self.rolled_back.lock().unwrap().push(id.to_string());
        self.entries.lock().unwrap().retain(|e| e.id() != id);
        Ok(())
    }

    async fn clear(&self, _kind: HistoryKind) -> Result<()> {
        self.entries.lock().unwrap().clear();
        Ok(())
    }
}
