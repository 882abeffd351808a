use crate::planning::domain::{
    AdminStats, AdminUser, DatabaseExport, ImportSummary, UserPermissions,
};
use crate::shared::Result;
use async_trait::async_trait;

/// PermissionRepository port for per-user permission records (admin only)
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    async fn get(&self, user_id: &str) -> Result<UserPermissions>;

    /// Applies the given modules only and returns the full resulting map
    async fn update(&self, user_id: &str, changes: &UserPermissions) -> Result<UserPermissions>;
}

#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn users(&self) -> Result<Vec<AdminUser>>;

    async fn stats(&self) -> Result<AdminStats>;

    async fn delete_user(&self, user_id: &str) -> Result<()>;

    async fn export(&self) -> Result<DatabaseExport>;

    async fn import(&self, data: &DatabaseExport) -> Result<ImportSummary>;
}
