use super::api_client::HttpApiClient;
use crate::planning::domain::{Theme, User};
use crate::ports::outbound::{AuthGateway, Credentials, LoginResponse, RegisterResponse};
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: User,
}

/// AuthGateway over `/auth`
pub struct HttpAuthGateway {
    api: Arc<HttpApiClient>,
}

impl HttpAuthGateway {
    pub fn new(api: Arc<HttpApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn register(&self, credentials: &Credentials) -> Result<RegisterResponse> {
        self.api.post("/auth/register", credentials).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        self.api.post("/auth/login", credentials).await
    }

    async fn me(&self) -> Result<User> {
        let envelope: UserEnvelope = self.api.get("/auth/me").await?;
        Ok(envelope.user)
    }

    async fn update_theme(&self, theme: Theme) -> Result<User> {
        let envelope: UserEnvelope = self
            .api
            .put("/auth/preferences", &json!({ "themePreference": theme }))
            .await?;
        Ok(envelope.user)
    }

    async fn update_widget_order(&self, widget_order: &[String]) -> Result<User> {
        let envelope: UserEnvelope = self
            .api
            .put("/auth/widget-order", &json!({ "widgetOrder": widget_order }))
            .await?;
        Ok(envelope.user)
    }

    async fn change_password(&self, new_password: &str) -> Result<()> {
        self.api
            .execute(
                Method::POST,
                "/auth/change-password",
                Some(&json!({ "newPassword": new_password })),
            )
            .await
    }
}
