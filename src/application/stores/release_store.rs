use super::logged;
use crate::planning::domain::{
    Action, CreateAction, CreateFeature, CreateRelease, Feature, Release, UpdateAction,
    UpdateRelease, UpdateSquad,
};
use crate::ports::outbound::ReleaseRepository;
use crate::shared::error::ApiError;
use crate::shared::Result;
use tokio::sync::watch;

/// ReleaseStore holds the release list and the release currently opened
///
/// Squad, feature and action mutations re-fetch the opened release so its
/// completion state comes from the server.
pub struct ReleaseStore<R: ReleaseRepository> {
    repository: R,
    releases: watch::Sender<Vec<Release>>,
    current: watch::Sender<Option<Release>>,
    loading: watch::Sender<bool>,
}

impl<R: ReleaseRepository> ReleaseStore<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            releases: watch::Sender::new(Vec::new()),
            current: watch::Sender::new(None),
            loading: watch::Sender::new(false),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Release>> {
        self.releases.subscribe()
    }

    pub fn subscribe_current(&self) -> watch::Receiver<Option<Release>> {
        self.current.subscribe()
    }

    pub fn loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    pub fn snapshot(&self) -> Vec<Release> {
        self.releases.borrow().clone()
    }

    pub fn current(&self) -> Option<Release> {
        self.current.borrow().clone()
    }

    fn current_id(&self) -> Option<String> {
        self.current.borrow().as_ref().map(|r| r.id.clone())
    }

    pub async fn load(&self) -> Result<Vec<Release>> {
        self.loading.send_replace(true);
        let result = logged("load releases", self.repository.list().await);
        self.loading.send_replace(false);

        let releases = result?;
        self.releases.send_replace(releases.clone());
        Ok(releases)
    }

    /// Fetches one release and makes it the current one
    pub async fn open(&self, id: &str) -> Result<Release> {
        let release = logged("open release", self.repository.get(id).await)?;
        self.current.send_replace(Some(release.clone()));
        Ok(release)
    }

    pub async fn create(&self, dto: CreateRelease) -> Result<Release> {
        let dto = dto.validated()?;
        let created = logged("create release", self.repository.create(&dto).await)?;
        self.load().await?;
        Ok(created)
    }

    pub async fn update(&self, id: &str, dto: UpdateRelease) -> Result<Release> {
        let dto = dto.validated()?;
        let updated = logged("update release", self.repository.update(id, &dto).await)?;
        if self.current_id().as_deref() == Some(id) {
            self.current.send_replace(Some(updated.clone()));
        }
        self.load().await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        logged("delete release", self.repository.delete(id).await)?;
        if self.current_id().as_deref() == Some(id) {
            self.current.send_replace(None);
        }
        self.load().await?;
        Ok(())
    }

    pub async fn update_squad(&self, squad_id: &str, dto: UpdateSquad) -> Result<()> {
        logged("update squad", self.repository.update_squad(squad_id, &dto).await)?;
        self.refresh_current().await
    }

    pub async fn add_feature(&self, squad_id: &str, dto: CreateFeature) -> Result<Feature> {
        let dto = dto.validated()?;
        let feature = logged("add feature", self.repository.add_feature(squad_id, &dto).await)?;
        self.refresh_current().await?;
        Ok(feature)
    }

    pub async fn update_feature(&self, feature_id: &str, dto: CreateFeature) -> Result<Feature> {
        let dto = dto.validated()?;
        let feature = logged(
            "update feature",
            self.repository.update_feature(feature_id, &dto).await,
        )?;
        self.refresh_current().await?;
        Ok(feature)
    }

    pub async fn delete_feature(&self, feature_id: &str) -> Result<()> {
        logged("delete feature", self.repository.delete_feature(feature_id).await)?;
        self.refresh_current().await
    }

    pub async fn add_action(&self, squad_id: &str, dto: CreateAction) -> Result<Action> {
        let dto = dto.validated()?;
        let action = logged("add action", self.repository.add_action(squad_id, &dto).await)?;
        self.refresh_current().await?;
        Ok(action)
    }

    pub async fn update_action(&self, action_id: &str, dto: UpdateAction) -> Result<Action> {
        let dto = dto.validated()?;
        let action = logged(
            "update action",
            self.repository.update_action(action_id, &dto).await,
        )?;
        self.refresh_current().await?;
        Ok(action)
    }

    pub async fn delete_action(&self, action_id: &str) -> Result<()> {
        logged("delete action", self.repository.delete_action(action_id).await)?;
        self.refresh_current().await
    }

    /// Flips an action of the current release between pending and completed
    pub async fn toggle_action_status(&self, action_id: &str) -> Result<Action> {
        let status = self
            .current
            .borrow()
            .as_ref()
            .and_then(|release| release.find_action(action_id))
            .map(|action| action.status.toggled());
        let status = status.ok_or_else(|| ApiError::NotFound {
            message: format!("Action {} is not part of the opened release", action_id),
        })?;

        self.update_action(
            action_id,
            UpdateAction {
                status: Some(status),
                ..UpdateAction::default()
            },
        )
        .await
    }

    /// Reloads the list and the current release
    pub async fn refresh(&self) -> Result<()> {
        self.load().await?;
        self.refresh_current().await
    }

    async fn refresh_current(&self) -> Result<()> {
        if let Some(id) = self.current_id() {
            self.open(&id).await?;
        }
        Ok(())
    }
}
