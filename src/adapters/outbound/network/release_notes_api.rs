use super::api_client::HttpApiClient;
use crate::planning::domain::{
    CreateMicroservice, Microservice, NoteExportFormat, ReleaseNoteEntry, ReleaseNoteRequest,
    UpdateMicroservice,
};
use crate::ports::outbound::{MicroserviceRepository, ReleaseNoteRepository};
use crate::shared::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// ReleaseNoteRepository over `/releases/{id}/release-notes`
pub struct HttpReleaseNoteRepository {
    api: Arc<HttpApiClient>,
}

impl HttpReleaseNoteRepository {
    pub fn new(api: Arc<HttpApiClient>) -> Self {
        Self { api }
    }

    fn base(release_id: &str) -> Result<String> {
        Ok(format!(
            "/releases/{}/release-notes",
            HttpApiClient::segment(release_id, "Release id")?
        ))
    }

    fn entry_path(release_id: &str, entry_id: &str) -> Result<String> {
        Ok(format!(
            "{}/{}",
            Self::base(release_id)?,
            HttpApiClient::segment(entry_id, "Entry id")?
        ))
    }
}

#[async_trait]
impl ReleaseNoteRepository for HttpReleaseNoteRepository {
    async fn list(&self, release_id: &str) -> Result<Vec<ReleaseNoteEntry>> {
        self.api.get(&Self::base(release_id)?).await
    }

    async fn create(
        &self,
        release_id: &str,
        request: &ReleaseNoteRequest,
    ) -> Result<ReleaseNoteEntry> {
        self.api.post(&Self::base(release_id)?, request).await
    }

    async fn update(
        &self,
        release_id: &str,
        entry_id: &str,
        request: &ReleaseNoteRequest,
    ) -> Result<ReleaseNoteEntry> {
        self.api
            .put(&Self::entry_path(release_id, entry_id)?, request)
            .await
    }

    async fn delete(&self, release_id: &str, entry_id: &str) -> Result<()> {
        self.api
            .delete(&Self::entry_path(release_id, entry_id)?)
            .await
    }

    async fn export(&self, release_id: &str, format: NoteExportFormat) -> Result<String> {
        let path = format!("{}/export/{}", Self::base(release_id)?, format.as_str());
        self.api.get_text(&path).await
    }
}

/// MicroserviceRepository over `/microservices`
pub struct HttpMicroserviceRepository {
    api: Arc<HttpApiClient>,
}

impl HttpMicroserviceRepository {
    pub fn new(api: Arc<HttpApiClient>) -> Self {
        Self { api }
    }

    fn path(id: &str) -> Result<String> {
        Ok(format!(
            "/microservices/{}",
            HttpApiClient::segment(id, "Microservice id")?
        ))
    }

    fn active_path(release_id: Option<&str>) -> String {
        format!(
            "/microservices{}",
            HttpApiClient::query(&[("releaseId", release_id.map(str::to_string))])
        )
    }
}

#[async_trait]
impl MicroserviceRepository for HttpMicroserviceRepository {
    async fn list_active(&self, release_id: Option<&str>) -> Result<Vec<Microservice>> {
        self.api.get(&Self::active_path(release_id)).await
    }

    async fn list_all(&self) -> Result<Vec<Microservice>> {
        self.api.get("/microservices/all").await
    }

    async fn list_by_squad(&self, squad: &str) -> Result<Vec<Microservice>> {
        let path = format!("/microservices/squad/{}", HttpApiClient::segment(squad, "Squad")?);
        self.api.get(&path).await
    }

    async fn get(&self, id: &str) -> Result<Microservice> {
        self.api.get(&Self::path(id)?).await
    }

    async fn create(&self, dto: &CreateMicroservice) -> Result<Microservice> {
        self.api.post("/microservices", dto).await
    }

    async fn update(&self, id: &str, dto: &UpdateMicroservice) -> Result<Microservice> {
        self.api.put(&Self::path(id)?, dto).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.api.delete(&Self::path(id)?).await
    }

    async fn hard_delete(&self, id: &str) -> Result<()> {
        self.api.delete(&format!("{}/hard", Self::path(id)?)).await
    }
}
