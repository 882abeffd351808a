use crate::planning::domain::{
    CreateMicroservice, Microservice, NoteExportFormat, ReleaseNoteEntry, ReleaseNoteRequest,
    UpdateMicroservice,
};
use crate::shared::Result;
use async_trait::async_trait;

/// ReleaseNoteRepository port for `/releases/{id}/release-notes`
#[async_trait]
pub trait ReleaseNoteRepository: Send + Sync {
    async fn list(&self, release_id: &str) -> Result<Vec<ReleaseNoteEntry>>;

    async fn create(
        &self,
        release_id: &str,
        request: &ReleaseNoteRequest,
    ) -> Result<ReleaseNoteEntry>;

    async fn update(
        &self,
        release_id: &str,
        entry_id: &str,
        request: &ReleaseNoteRequest,
    ) -> Result<ReleaseNoteEntry>;

    async fn delete(&self, release_id: &str, entry_id: &str) -> Result<()>;

    /// Release note document rendered by the server
    async fn export(&self, release_id: &str, format: NoteExportFormat) -> Result<String>;
}

/// MicroserviceRepository port for `/microservices`
#[async_trait]
pub trait MicroserviceRepository: Send + Sync {
    /// Active microservices; with a release, each carries the tag in production
    async fn list_active(&self, release_id: Option<&str>) -> Result<Vec<Microservice>>;

    /// Active and deactivated microservices
    async fn list_all(&self) -> Result<Vec<Microservice>>;

    async fn list_by_squad(&self, squad: &str) -> Result<Vec<Microservice>>;

    async fn get(&self, id: &str) -> Result<Microservice>;

    async fn create(&self, dto: &CreateMicroservice) -> Result<Microservice>;

    async fn update(&self, id: &str, dto: &UpdateMicroservice) -> Result<Microservice>;

    /// Deactivates the microservice; release notes keep referring to it
    async fn delete(&self, id: &str) -> Result<()>;

    async fn hard_delete(&self, id: &str) -> Result<()>;
}
