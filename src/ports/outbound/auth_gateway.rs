use crate::planning::domain::{Theme, User};
use crate::shared::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Reply to a successful login
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,
    pub token: String,
    pub user: User,
}

/// Reply to a successful registration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub user: Option<User>,
}

/// AuthGateway port for the `/auth` resource
///
/// Every method except `register` and `login` requires a bearer token;
/// implementations attach it from the session store.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn register(&self, credentials: &Credentials) -> Result<RegisterResponse>;

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;

    /// Profile of the token's owner, permissions included
    async fn me(&self) -> Result<User>;

    /// Stores the theme and returns the updated user
    async fn update_theme(&self, theme: Theme) -> Result<User>;

    async fn update_widget_order(&self, widget_order: &[String]) -> Result<User>;

    async fn change_password(&self, new_password: &str) -> Result<()>;
}
