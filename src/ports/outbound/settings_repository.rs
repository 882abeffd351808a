use crate::planning::domain::UserPreferences;
use crate::shared::Result;
use async_trait::async_trait;

/// SettingsRepository port for the current user's preferences
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn get(&self) -> Result<UserPreferences>;

    /// Replaces the whole preferences document and returns the stored version
    async fn put(&self, preferences: &UserPreferences) -> Result<UserPreferences>;
}
