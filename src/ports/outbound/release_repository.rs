use crate::planning::domain::{
    Action, CreateAction, CreateFeature, CreateRelease, Feature, Release, UpdateAction,
    UpdateRelease, UpdateSquad,
};
use crate::shared::Result;
use async_trait::async_trait;

/// ReleaseRepository port for `/releases` and its squad, feature and action
/// sub-resources
#[async_trait]
pub trait ReleaseRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Release>>;

    /// Release with its squads, features and actions
    async fn get(&self, id: &str) -> Result<Release>;

    async fn create(&self, dto: &CreateRelease) -> Result<Release>;

    async fn update(&self, id: &str, dto: &UpdateRelease) -> Result<Release>;

    async fn delete(&self, id: &str) -> Result<()>;

    async fn update_squad(&self, squad_id: &str, dto: &UpdateSquad) -> Result<()>;

    async fn add_feature(&self, squad_id: &str, dto: &CreateFeature) -> Result<Feature>;

    async fn update_feature(&self, feature_id: &str, dto: &CreateFeature) -> Result<Feature>;

    async fn delete_feature(&self, feature_id: &str) -> Result<()>;

    async fn add_action(&self, squad_id: &str, dto: &CreateAction) -> Result<Action>;

    async fn update_action(&self, action_id: &str, dto: &UpdateAction) -> Result<Action>;

    async fn delete_action(&self, action_id: &str) -> Result<()>;
}
