use std::sync::{Arc, Mutex};
use event_planner::prelude::*;

/// AuthGateway returning a fixed user; `me` can be made to fail
#[derive(Clone)]
pub struct MockAuthGateway {
    pub user: User,
    pub me_fails: bool,
    pub logins: Arc<Mutex<Vec<String>>>,
}

impl MockAuthGateway {
    pub fn new(permissions: &[(PermissionModule, PermissionLevel)]) -> Self {
        Self {
            user: User {
                id: "u1".to_string(),
                email: "jane.doe@example.com".to_string(),
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                theme_preference: Theme::Light,
                widget_order: String::new(),
                permissions: Some(permissions.iter().copied().collect()),
                created_at: None,
                updated_at: None,
            },
            me_fails: false,
            logins: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_failing_me(mut self) -> Self {
        self.me_fails = true;
        self
    }

    pub fn login_count(&self) -> usize {
        self.logins.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl AuthGateway for MockAuthGateway {
    async fn register(&self, _credentials: &Credentials) -> Result<RegisterResponse> {
        Ok(RegisterResponse {
            message: "Compte créé".to_string(),
            user: Some(self.user.clone()),
        })
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        self.logins.lock().unwrap().push(credentials.email.clone());
        if credentials.password != "secret" {
            return Err(
                ApiError::from_status(401, Some("Identifiants invalides".to_string())).into(),
            );
        }
        Ok(LoginResponse {
            message: "Connexion réussie".to_string(),
            token: "token-123".to_string(),
            user: self.user.clone(),
        })
    }

    async fn me(&self) -> Result<User> {
        if self.me_fails {
            return Err(ApiError::from_status(401, None).into());
        }
        Ok(self.user.clone())
    }

    async fn update_theme(&self, theme: Theme) -> Result<User> {
        Ok(User {
            theme_preference: theme,
            ..self.user.clone()
        })
    }

    async fn update_widget_order(&self, widget_order: &[String]) -> Result<User> {
        Ok(User {
            widget_order: serde_json::to_string(widget_order)?,
            ..self.user.clone()
        })
    }

    async fn change_password(&self, _new_password: &str) -> Result<()> {
        Ok(())
    }
}
