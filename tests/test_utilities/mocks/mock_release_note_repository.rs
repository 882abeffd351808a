use event_planner::prelude::*;
use std::sync::{Arc, Mutex};

/// ReleaseNoteRepository keeping entries in memory and recording calls
#[derive(Clone, Default)]
pub struct MockReleaseNoteRepository {
    pub entries: Arc<Mutex<Vec<ReleaseNoteEntry>>>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockReleaseNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

fn to_entry(id: &str, release_id: &str, request: &ReleaseNoteRequest) -> ReleaseNoteEntry {
    ReleaseNoteEntry {
        id: Some(id.to_string()),
        release_id: release_id.to_string(),
        microservice_id: request.microservice_id.clone(),
        microservice: request.microservice.clone(),
        microservice_name: None,
        solution: None,
        squad: request.squad.clone(),
        part_en_mep: request.part_en_mep,
        deploy_order: request.deploy_order,
        tag: request.tag.clone(),
        previous_tag: request.previous_tag.clone(),
        parent_version: request.parent_version.clone(),
        changes: request.changes.clone(),
        comment: request.comment.clone(),
        status: request.status,
        created_at: None,
        updated_at: None,
    }
}

#[async_trait::async_trait]
impl ReleaseNoteRepository for MockReleaseNoteRepository {
    async fn list(&self, release_id: &str) -> Result<Vec<ReleaseNoteEntry>> {
        self.record(format!("list {}", release_id));
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.release_id == release_id)
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        release_id: &str,
        request: &ReleaseNoteRequest,
    ) -> Result<ReleaseNoteEntry> {
        self.record(format!("create {}", release_id));
        let mut entries = self.entries.lock().unwrap();
        let entry = to_entry(&format!("rn-{}", entries.len() + 1), release_id, request);
        entries.push(entry.clone());
        Ok(entry)
    }

    async fn update(
        &self,
        release_id: &str,
        entry_id: &str,
        request: &ReleaseNoteRequest,
    ) -> Result<ReleaseNoteEntry> {
        self.record(format!("update {}", entry_id));
        let entry = to_entry(entry_id, release_id, request);
        let mut entries = self.entries.lock().unwrap();
        match entries.iter_mut().find(|e| e.id.as_deref() == Some(entry_id)) {
            Some(existing) => *existing = entry.clone(),
            None => {
                return Err(ApiError::NotFound {
                    message: format!("entry {}", entry_id),
                }
                .into())
            }
        }
        Ok(entry)
    }

    async fn delete(&self, _release_id: &str, entry_id: &str) -> Result<()> {
        self.record(format!("delete {}", entry_id));
        self.entries
            .lock()
            .unwrap()
            .retain(|e| e.id.as_deref() != Some(entry_id));
        Ok(())
    }

    async fn export(&self, release_id: &str, format: NoteExportFormat) -> Result<String> {
        self.record(format!("export {} {}", release_id, format.as_str()));
        Ok(format!("# Release note {}", release_id))
    }
}
