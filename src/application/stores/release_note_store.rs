use super::logged;
use crate::planning::domain::{
    sort_for_deployment, CreateMicroservice, Microservice, NoteExportFormat, ReleaseNoteEntry,
    ReleaseNoteRequest, UpdateMicroservice,
};
use crate::ports::outbound::{MicroserviceRepository, ReleaseNoteRepository};
use crate::shared::error::ApiError;
use crate::shared::Result;
use tokio::sync::watch;

/// ReleaseNoteStore holds the release note of one release, in deployment order
pub struct ReleaseNoteStore<R: ReleaseNoteRepository> {
    repository: R,
    release_id: watch::Sender<Option<String>>,
    entries: watch::Sender<Vec<ReleaseNoteEntry>>,
}

impl<R: ReleaseNoteRepository> ReleaseNoteStore<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            release_id: watch::Sender::new(None),
            entries: watch::Sender::new(Vec::new()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<ReleaseNoteEntry>> {
        self.entries.subscribe()
    }

    pub fn snapshot(&self) -> Vec<ReleaseNoteEntry> {
        self.entries.borrow().clone()
    }

    /// Entries of `squad` (all squads when `None`), optionally only those deployed
    pub fn filtered(&self, squad: Option<&str>, deployed_only: bool) -> Vec<ReleaseNoteEntry> {
        self.entries
            .borrow()
            .iter()
            .filter(|e| squad.is_none_or(|s| e.squad == s))
            .filter(|e| !deployed_only || e.part_en_mep)
            .cloned()
            .collect()
    }

    /// Loads the release note of `release_id`; later reloads reuse it
    pub async fn load(&self, release_id: &str) -> Result<Vec<ReleaseNoteEntry>> {
        self.release_id.send_replace(Some(release_id.to_string()));
        self.reload().await
    }

    fn release_id(&self) -> Result<String> {
        self.release_id.borrow().clone().ok_or_else(|| {
            ApiError::NotFound {
                message: "No release note is loaded".to_string(),
            }
            .into()
        })
    }

    async fn reload(&self) -> Result<Vec<ReleaseNoteEntry>> {
        let release_id = self.release_id()?;
        let mut entries = logged(
            "load release note",
            self.repository.list(&release_id).await,
        )?;
        sort_for_deployment(&mut entries);
        self.entries.send_replace(entries.clone());
        Ok(entries)
    }

    pub async fn create(&self, request: ReleaseNoteRequest) -> Result<ReleaseNoteEntry> {
        let release_id = self.release_id()?;
        let request = request.validated()?;
        let created = logged(
            "create release note entry",
            self.repository.create(&release_id, &request).await,
        )?;
        self.reload().await?;
        Ok(created)
    }

    pub async fn update(
        &self,
        entry_id: &str,
        request: ReleaseNoteRequest,
    ) -> Result<ReleaseNoteEntry> {
        let release_id = self.release_id()?;
        let request = request.validated()?;
        let updated = logged(
            "update release note entry",
            self.repository.update(&release_id, entry_id, &request).await,
        )?;
        self.reload().await?;
        Ok(updated)
    }

    pub async fn delete(&self, entry_id: &str) -> Result<()> {
        let release_id = self.release_id()?;
        logged(
            "delete release note entry",
            self.repository.delete(&release_id, entry_id).await,
        )?;
        self.reload().await.map(|_| ())
    }

    pub async fn export(&self, format: NoteExportFormat) -> Result<String> {
        let release_id = self.release_id()?;
        logged(
            "export release note",
            self.repository.export(&release_id, format).await,
        )
    }
}

/// MicroserviceStore holds the active microservice catalog
pub struct MicroserviceStore<R: MicroserviceRepository> {
    repository: R,
    microservices: watch::Sender<Vec<Microservice>>,
}

impl<R: MicroserviceRepository> MicroserviceStore<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            microservices: watch::Sender::new(Vec::new()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Microservice>> {
        self.microservices.subscribe()
    }

    pub fn snapshot(&self) -> Vec<Microservice> {
        self.microservices.borrow().clone()
    }

    pub async fn load(&self) -> Result<Vec<Microservice>> {
        let mut microservices = logged(
            "load microservices",
            self.repository.list_active(None).await,
        )?;
        microservices.sort_by(|a, b| {
            a.squad
                .cmp(&b.squad)
                .then(a.display_order.cmp(&b.display_order))
        });
        self.microservices.send_replace(microservices.clone());
        Ok(microservices)
    }

    /// Active microservices with the tag each has in production before `release_id`
    pub async fn for_release(&self, release_id: &str) -> Result<Vec<Microservice>> {
        logged(
            "load microservices for release",
            self.repository.list_active(Some(release_id)).await,
        )
    }

    pub async fn all(&self) -> Result<Vec<Microservice>> {
        logged("load all microservices", self.repository.list_all().await)
    }

    pub async fn by_squad(&self, squad: &str) -> Result<Vec<Microservice>> {
        logged(
            "load squad microservices",
            self.repository.list_by_squad(squad).await,
        )
    }

    pub async fn create(&self, dto: CreateMicroservice) -> Result<Microservice> {
        let dto = dto.validated()?;
        let created = logged("create microservice", self.repository.create(&dto).await)?;
        self.load().await?;
        Ok(created)
    }

    pub async fn update(&self, id: &str, dto: UpdateMicroservice) -> Result<Microservice> {
        let dto = dto.validated()?;
        let updated = logged(
            "update microservice",
            self.repository.update(id, &dto).await,
        )?;
        self.load().await?;
        Ok(updated)
    }

    /// Soft delete: the microservice leaves the active list
    pub async fn deactivate(&self, id: &str) -> Result<()> {
        logged("deactivate microservice", self.repository.delete(id).await)?;
        self.load().await.map(|_| ())
    }

    pub async fn hard_delete(&self, id: &str) -> Result<()> {
        logged(
            "delete microservice",
            self.repository.hard_delete(id).await,
        )?;
        self.load().await.map(|_| ())
    }
}
