use crate::application::dto::AuthOutcome;
use crate::planning::domain::{Theme, User, UserPermissions};
use crate::planning::policies::AccessPolicy;
use crate::ports::outbound::{AuthGateway, Credentials, Session, SessionStore};
use crate::shared::error::{ApiError, PlannerError};
use crate::shared::Result;
use std::sync::Arc;
use tokio::sync::watch;

const REGISTER_FAILED: &str = "Erreur lors de la création du compte";
const LOGIN_FAILED: &str = "Erreur lors de la connexion";
const CHANGE_PASSWORD_FAILED: &str = "Erreur lors du changement de mot de passe";
const PASSWORD_CHANGED: &str = "Mot de passe modifié avec succès";
const NOT_AUTHENTICATED: &str = "Non authentifié";
const CREDENTIALS_REQUIRED: &str = "Email et mot de passe requis";

/// AuthService owns the authentication session
///
/// The token and the user it belongs to are kept in the session store; the
/// `watch` channels mirror them for whoever displays the current user.
pub struct AuthService<G: AuthGateway> {
    gateway: G,
    session: Arc<dyn SessionStore>,
    authenticated: watch::Sender<bool>,
    current_user: watch::Sender<Option<User>>,
}

impl<G: AuthGateway> AuthService<G> {
    /// Restores the state from whatever session the store already holds
    pub fn new(gateway: G, session: Arc<dyn SessionStore>) -> Self {
        let stored = session.load().unwrap_or_else(|error| {
            tracing::warn!(%error, "could not read the stored session");
            None
        });
        let authenticated = stored.is_some();
        let user = stored.and_then(|s| s.user);

        Self {
            gateway,
            session,
            authenticated: watch::Sender::new(authenticated),
            current_user: watch::Sender::new(user),
        }
    }

    pub fn subscribe_authenticated(&self) -> watch::Receiver<bool> {
        self.authenticated.subscribe()
    }

    pub fn subscribe_user(&self) -> watch::Receiver<Option<User>> {
        self.current_user.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        *self.authenticated.borrow()
    }

    pub fn current_user(&self) -> Option<User> {
        self.current_user.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.session.token()
    }

    /// Fails with `PlannerError::NotAuthenticated` when there is no token
    pub fn require_session(&self) -> Result<()> {
        match self.token() {
            Some(_) => Ok(()),
            None => Err(PlannerError::NotAuthenticated.into()),
        }
    }

    pub async fn register(&self, email: &str, password: &str) -> AuthOutcome {
        let Some(credentials) = credentials(email, password) else {
            return AuthOutcome::failure(CREDENTIALS_REQUIRED);
        };
        match self.gateway.register(&credentials).await {
            Ok(response) => AuthOutcome::success(response.message),
            Err(error) => {
                tracing::error!(%error, "registration failed");
                AuthOutcome::failure(failure_message(&error, REGISTER_FAILED))
            }
        }
    }

    /// Opens a session; on failure the current state is left untouched
    pub async fn login(&self, email: &str, password: &str) -> AuthOutcome {
        let Some(credentials) = credentials(email, password) else {
            return AuthOutcome::failure(CREDENTIALS_REQUIRED);
        };
        let response = match self.gateway.login(&credentials).await {
            Ok(response) => response,
            Err(error) => {
                tracing::error!(%error, "login failed");
                return AuthOutcome::failure(failure_message(&error, LOGIN_FAILED));
            }
        };

        let session = Session::new(response.token, Some(response.user.clone()));
        if let Err(error) = self.session.save(&session) {
            tracing::error!(%error, "could not store the session");
            return AuthOutcome::failure(error.to_string());
        }
        self.authenticated.send_replace(true);
        self.current_user.send_replace(Some(response.user));
        AuthOutcome::success(response.message)
    }

    pub fn logout(&self) {
        if let Err(error) = self.session.clear() {
            tracing::error!(%error, "could not clear the stored session");
        }
        self.authenticated.send_replace(false);
        self.current_user.send_replace(None);
    }

    /// Refreshes the user from the API; any failure ends the session
    pub async fn fetch_current_user(&self) -> Option<User> {
        self.token()?;
        match self.gateway.me().await {
            Ok(user) => {
                self.store_user(user.clone());
                Some(user)
            }
            Err(error) => {
                tracing::error!(%error, "failed to fetch the current user");
                self.logout();
                None
            }
        }
    }

    pub async fn update_theme(&self, theme: Theme) -> bool {
        if self.token().is_none() {
            return false;
        }
        match self.gateway.update_theme(theme).await {
            Ok(user) => {
                self.store_user(user);
                true
            }
            Err(error) => {
                tracing::error!(%error, "failed to update the theme preference");
                false
            }
        }
    }

    pub async fn update_widget_order(&self, widget_order: &[String]) -> bool {
        if self.token().is_none() {
            return false;
        }
        match self.gateway.update_widget_order(widget_order).await {
            Ok(user) => {
                self.store_user(user);
                true
            }
            Err(error) => {
                tracing::error!(%error, "failed to update the widget order");
                false
            }
        }
    }

    pub fn widget_order(&self) -> Vec<String> {
        self.current_user
            .borrow()
            .as_ref()
            .map(User::widget_order)
            .unwrap_or_default()
    }

    pub async fn change_password(&self, new_password: &str) -> AuthOutcome {
        if self.token().is_none() {
            return AuthOutcome::failure(NOT_AUTHENTICATED);
        }
        if new_password.trim().is_empty() {
            return AuthOutcome::failure("Mot de passe requis");
        }
        match self.gateway.change_password(new_password).await {
            Ok(()) => AuthOutcome::success(PASSWORD_CHANGED),
            Err(error) => {
                tracing::error!(%error, "password change failed");
                AuthOutcome::failure(failure_message(&error, CHANGE_PASSWORD_FAILED))
            }
        }
    }

    pub fn permissions(&self) -> Option<UserPermissions> {
        self.current_user
            .borrow()
            .as_ref()
            .and_then(|u| u.permissions.clone())
    }

    /// Access policy of the current user; no user means no access
    pub fn access_policy(&self) -> AccessPolicy {
        AccessPolicy::from_permissions(self.permissions().as_ref())
    }

    pub fn display_name(&self) -> String {
        crate::planning::domain::user::display_name(self.current_user.borrow().as_ref())
    }

    fn store_user(&self, user: User) {
        if let Some(token) = self.token() {
            if let Err(error) = self.session.save(&Session::new(token, Some(user.clone()))) {
                tracing::warn!(%error, "could not update the stored user");
            }
        }
        self.current_user.send_replace(Some(user));
    }
}

fn credentials(email: &str, password: &str) -> Option<Credentials> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return None;
    }
    Some(Credentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}

/// Message reported by the server, or `default` when the request never got an answer
fn failure_message(error: &anyhow::Error, default: &str) -> String {
    match error.downcast_ref::<ApiError>() {
        Some(
            ApiError::Unauthorized { message }
            | ApiError::PermissionDenied { message }
            | ApiError::NotFound { message }
            | ApiError::Server { message, .. },
        ) => message.clone(),
        _ => default.to_string(),
    }
}
