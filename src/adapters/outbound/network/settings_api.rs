use super::api_client::HttpApiClient;
use crate::planning::domain::{AuditEntry, HistoryEntry, HistoryKind, ReleaseHistoryEntry, UserPreferences};
use crate::ports::outbound::{HistoryRepository, SettingsRepository};
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;

/// SettingsRepository over `/settings`
pub struct HttpSettingsRepository {
    api: Arc<HttpApiClient>,
}

impl HttpSettingsRepository {
    pub fn new(api: Arc<HttpApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl SettingsRepository for HttpSettingsRepository {
    async fn get(&self) -> Result<UserPreferences> {
        self.api.get("/settings").await
    }

    async fn put(&self, preferences: &UserPreferences) -> Result<UserPreferences> {
        self.api.put("/settings", preferences).await
    }
}

/// HistoryRepository over `/history` and `/release-history`
pub struct HttpHistoryRepository {
    api: Arc<HttpApiClient>,
}

impl HttpHistoryRepository {
    pub fn new(api: Arc<HttpApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl HistoryRepository for HttpHistoryRepository {
    async fn list(&self, kind: HistoryKind) -> Result<Vec<AuditEntry>> {
        let path = format!("/{}", kind.resource());
        Ok(match kind {
            HistoryKind::Events => self
                .api
                .get::<Vec<HistoryEntry>>(&path)
                .await?
                .into_iter()
                .map(AuditEntry::Event)
                .collect(),
            HistoryKind::Releases => self
                .api
                .get::<Vec<ReleaseHistoryEntry>>(&path)
                .await?
                .into_iter()
                .map(AuditEntry::Release)
                .collect(),
        })
    }

    async fn rollback(&self, kind: HistoryKind, id: &str) -> Result<()> {
        let path = format!(
            "/{}/{}/rollback",
            kind.resource(),
            HttpApiClient::segment(id, "History entry id")?
        );
        self.api
            .execute(Method::POST, &path, Some(&serde_json::json!({})))
            .await
    }

    async fn clear(&self, kind: HistoryKind) -> Result<()> {
        self.api.delete(&format!("/{}", kind.resource())).await
    }
}
