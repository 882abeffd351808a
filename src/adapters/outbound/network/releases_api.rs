use super::api_client::HttpApiClient;
use crate::planning::domain::{
    Action, CreateAction, CreateFeature, CreateRelease, Feature, Release, UpdateAction,
    UpdateRelease, UpdateSquad,
};
use crate::ports::outbound::ReleaseRepository;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::Method;
use std::sync::Arc;

/// ReleaseRepository over `/releases` and its sub-resources
pub struct HttpReleaseRepository {
    api: Arc<HttpApiClient>,
}

impl HttpReleaseRepository {
    pub fn new(api: Arc<HttpApiClient>) -> Self {
        Self { api }
    }

    fn path(kind: &str, id: &str) -> Result<String> {
        let segment = HttpApiClient::segment(id, kind)?;
        Ok(match kind {
            "Squad id" => format!("/releases/squads/{}", segment),
            "Feature id" => format!("/releases/features/{}", segment),
            "Action id" => format!("/releases/actions/{}", segment),
            _ => format!("/releases/{}", segment),
        })
    }
}

#[async_trait]
impl ReleaseRepository for HttpReleaseRepository {
    async fn list(&self) -> Result<Vec<Release>> {
        self.api.get("/releases").await
    }

    async fn get(&self, id: &str) -> Result<Release> {
        self.api.get(&Self::path("Release id", id)?).await
    }

    async fn create(&self, dto: &CreateRelease) -> Result<Release> {
        self.api.post("/releases", dto).await
    }

    async fn update(&self, id: &str, dto: &UpdateRelease) -> Result<Release> {
        self.api.put(&Self::path("Release id", id)?, dto).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.api.delete(&Self::path("Release id", id)?).await
    }

    async fn update_squad(&self, squad_id: &str, dto: &UpdateSquad) -> Result<()> {
        self.api
            .execute(Method::PUT, &Self::path("Squad id", squad_id)?, Some(dto))
            .await
    }

    async fn add_feature(&self, squad_id: &str, dto: &CreateFeature) -> Result<Feature> {
        let path = format!("{}/features", Self::path("Squad id", squad_id)?);
        self.api.post(&path, dto).await
    }

    async fn update_feature(&self, feature_id: &str, dto: &CreateFeature) -> Result<Feature> {
        self.api
            .put(&Self::path("Feature id", feature_id)?, dto)
            .await
    }

    async fn delete_feature(&self, feature_id: &str) -> Result<()> {
        self.api
            .delete(&Self::path("Feature id", feature_id)?)
            .await
    }

    async fn add_action(&self, squad_id: &str, dto: &CreateAction) -> Result<Action> {
        let path = format!("{}/actions", Self::path("Squad id", squad_id)?);
        self.api.post(&path, dto).await
    }

    async fn update_action(&self, action_id: &str, dto: &UpdateAction) -> Result<Action> {
        self.api.put(&Self::path("Action id", action_id)?, dto).await
    }

    async fn delete_action(&self, action_id: &str) -> Result<()> {
        self.api.delete(&Self::path("Action id", action_id)?).await
    }
}
