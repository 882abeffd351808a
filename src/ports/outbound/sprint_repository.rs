use crate::planning::domain::{ClosedDay, Sprint};
use crate::shared::Result;
use async_trait::async_trait;

#[async_trait]
pub trait SprintRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Sprint>>;

    async fn create(&self, sprint: &Sprint) -> Result<Sprint>;

    async fn update(&self, id: &str, sprint: &Sprint) -> Result<Sprint>;

    async fn delete(&self, id: &str) -> Result<()>;
}

/// ClosedDayRepository port; closed days cannot be edited, only replaced
#[async_trait]
pub trait ClosedDayRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<ClosedDay>>;

    async fn create(&self, day: &ClosedDay) -> Result<ClosedDay>;

    async fn delete(&self, id: &str) -> Result<()>;
}
