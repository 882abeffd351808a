use super::api_client::HttpApiClient;
use crate::planning::domain::{
    AdminStats, AdminUser, DatabaseExport, ImportSummary, UserPermissions,
};
use crate::ports::outbound::{AdminRepository, PermissionRepository};
use crate::shared::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct PermissionsEnvelope {
    #[serde(default)]
    permissions: UserPermissions,
}

#[derive(Debug, Deserialize)]
struct UsersEnvelope {
    users: Vec<AdminUser>,
}

#[derive(Debug, Deserialize)]
struct StatsEnvelope {
    stats: AdminStats,
}

/// PermissionRepository over `/admin/permissions`
pub struct HttpPermissionRepository {
    api: Arc<HttpApiClient>,
}

impl HttpPermissionRepository {
    pub fn new(api: Arc<HttpApiClient>) -> Self {
        Self { api }
    }

    fn path(user_id: &str) -> Result<String> {
        Ok(format!(
            "/admin/permissions/{}",
            HttpApiClient::segment(user_id, "User id")?
        ))
    }
}

#[async_trait]
impl PermissionRepository for HttpPermissionRepository {
    async fn get(&self, user_id: &str) -> Result<UserPermissions> {
        let envelope: PermissionsEnvelope = self.api.get(&Self::path(user_id)?).await?;
        Ok(envelope.permissions)
    }

    async fn update(&self, user_id: &str, changes: &UserPermissions) -> Result<UserPermissions> {
        let envelope: PermissionsEnvelope = self
            .api
            .put(&Self::path(user_id)?, &json!({ "permissions": changes }))
            .await?;
        Ok(envelope.permissions)
    }
}

/// AdminRepository over `/admin`
pub struct HttpAdminRepository {
    api: Arc<HttpApiClient>,
}

impl HttpAdminRepository {
    pub fn new(api: Arc<HttpApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AdminRepository for HttpAdminRepository {
    async fn users(&self) -> Result<Vec<AdminUser>> {
        let envelope: UsersEnvelope = self.api.get("/admin/users").await?;
        Ok(envelope.users)
    }

    async fn stats(&self) -> Result<AdminStats> {
        let envelope: StatsEnvelope = self.api.get("/admin/stats").await?;
        Ok(envelope.stats)
    }

    async fn delete_user(&self, user_id: &str) -> Result<()> {
        let path = format!("/admin/users/{}", HttpApiClient::segment(user_id, "User id")?);
        self.api.delete(&path).await
    }

    async fn export(&self) -> Result<DatabaseExport> {
        self.api.get("/admin/export").await
    }

    async fn import(&self, data: &DatabaseExport) -> Result<ImportSummary> {
        self.api.post("/admin/import", data).await
    }
}
