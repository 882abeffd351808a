//! In-memory repositories shared by the use case tests

use crate::planning::domain::{
    Action, AdminStats, AdminUser, AuditEntry, CreateAction, CreateFeature, CreateRelease,
    DatabaseExport, Event, EventDraft, Feature, HistoryKind, ImportSummary, Release,
    UpdateAction, UpdateRelease, UpdateSquad, UserPreferences,
};
use crate::ports::outbound::{
    AdminRepository, EventRepository, HistoryRepository, ReleaseRepository, SettingsRepository,
};
use crate::shared::error::ApiError;
use crate::shared::Result;
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Default)]
pub(crate) struct RecordingAdmin {
    pub calls: Mutex<Vec<String>>,
    pub fail_export: bool,
    pub imported: Mutex<Option<DatabaseExport>>,
}

impl RecordingAdmin {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

#[async_trait]
impl AdminRepository for RecordingAdmin {
    async fn users(&self) -> Result<Vec<AdminUser>> {
        self.record("users");
        Ok(Vec::new())
    }

    async fn stats(&self) -> Result<AdminStats> {
        self.record("stats");
        Ok(AdminStats {
            total_users: 2,
            total_events: 5,
            total_releases: 1,
            total_history_entries: 9,
        })
    }

    async fn delete_user(&self, _user_id: &str) -> Result<()> {
        self.record("delete_user");
        Ok(())
    }

    async fn export(&self) -> Result<DatabaseExport> {
        self.record("export");
        if self.fail_export {
            return Err(ApiError::from_status(500, None).into());
        }
        Ok(DatabaseExport(serde_json::json!({ "users": [{ "id": "u1" }], "events": [] })))
    }

    async fn import(&self, data: &DatabaseExport) -> Result<ImportSummary> {
        self.record("import");
        *self.imported.lock().unwrap() = Some(data.clone());
        Ok(ImportSummary {
            message: Some("ok".to_string()),
            imported: None,
        })
    }
}

/// Read-only event list
pub(crate) struct FixedEvents(pub Vec<Event>);

#[async_trait]
impl EventRepository for FixedEvents {
    async fn list(&self) -> Result<Vec<Event>> {
        Ok(self.0.clone())
    }
    async fn get(&self, id: &str) -> Result<Event> {
        self.0
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| ApiError::from_status(404, None).into())
    }
    async fn create(&self, _draft: &EventDraft) -> Result<Event> {
        unreachable!("read-only repository")
    }
    async fn update(&self, _id: &str, _draft: &EventDraft) -> Result<Event> {
        unreachable!("read-only repository")
    }
    async fn delete(&self, _id: &str) -> Result<()> {
        unreachable!("read-only repository")
    }
    async fn bulk_import(&self, _drafts: &[EventDraft]) -> Result<()> {
        unreachable!("read-only repository")
    }
    async fn clear_all(&self) -> Result<()> {
        unreachable!("read-only repository")
    }
}

pub(crate) struct FixedReleases(pub Vec<Release>);

#[async_trait]
impl ReleaseRepository for FixedReleases {
    async fn list(&self) -> Result<Vec<Release>> {
        Ok(self.0.clone())
    }
    async fn get(&self, _id: &str) -> Result<Release> {
        unreachable!("read-only repository")
    }
    async fn create(&self, _dto: &CreateRelease) -> Result<Release> {
        unreachable!("read-only repository")
    }
    async fn update(&self, _id: &str, _dto: &UpdateRelease) -> Result<Release> {
        unreachable!("read-only repository")
    }
    async fn delete(&self, _id: &str) -> Result<()> {
        unreachable!("read-only repository")
    }
    async fn update_squad(&self, _squad_id: &str, _dto: &UpdateSquad) -> Result<()> {
        unreachable!("read-only repository")
    }
    async fn add_feature(&self, _squad_id: &str, _dto: &CreateFeature) -> Result<Feature> {
        unreachable!("read-only repository")
    }
    async fn update_feature(&self, _feature_id: &str, _dto: &CreateFeature) -> Result<Feature> {
        unreachable!("read-only repository")
    }
    async fn delete_feature(&self, _feature_id: &str) -> Result<()> {
        unreachable!("read-only repository")
    }
    async fn add_action(&self, _squad_id: &str, _dto: &CreateAction) -> Result<Action> {
        unreachable!("read-only repository")
    }
    async fn update_action(&self, _action_id: &str, _dto: &UpdateAction) -> Result<Action> {
        unreachable!("read-only repository")
    }
    async fn delete_action(&self, _action_id: &str) -> Result<()> {
        unreachable!("read-only repository")
    }
}

pub(crate) struct FixedSettings(pub UserPreferences);

#[async_trait]
impl SettingsRepository for FixedSettings {
    async fn get(&self) -> Result<UserPreferences> {
        Ok(self.0.clone())
    }
    async fn put(&self, preferences: &UserPreferences) -> Result<UserPreferences> {
        Ok(preferences.clone())
    }
}

/// History whose listing fails with `status` when set
pub(crate) struct FixedHistory {
    pub entries: usize,
    pub fail_with: Option<u16>,
}

#[async_trait]
impl HistoryRepository for FixedHistory {
    async fn list(&self, _kind: HistoryKind) -> Result<Vec<AuditEntry>> {
        if let Some(status) = self.fail_with {
            return Err(ApiError::from_status(status, None).into());
        }
        let entry = serde_json::from_value(serde_json::json!({
            "id": "h1",
            "action": "create",
            "timestamp": "2025-01-01T10:00:00Z"
        }))?;
        Ok(vec![AuditEntry::Event(entry); self.entries])
    }
    async fn rollback(&self, _kind: HistoryKind, _id: &str) -> Result<()> {
        unreachable!("read-only repository")
    }
    async fn clear(&self, _kind: HistoryKind) -> Result<()> {
        unreachable!("read-only repository")
    }
}
