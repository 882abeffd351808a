use crate::shared::Result;
use async_trait::async_trait;

#[async_trait]
pub trait OnboardingRepository: Send + Sync {
    /// Keys of the tips the user has already dismissed
    async fn seen_keys(&self) -> Result<Vec<String>>;

    async fn mark_seen(&self, key: &str) -> Result<()>;

    async fn skip_all(&self) -> Result<()>;
}
