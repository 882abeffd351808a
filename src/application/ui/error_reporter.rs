use super::toast_service::{ToastService, ERROR_DURATION};
use crate::shared::error::ApiError;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

/// Window during which repeated network failures only log out once
pub const NETWORK_DEBOUNCE: Duration = Duration::from_secs(5);
const NETWORK_TOAST_DURATION: Duration = Duration::from_millis(10_000);

type LogoutHook = Arc<dyn Fn() + Send + Sync>;

/// What the reporter did with an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reported {
    /// A toast was shown
    Toast,
    /// The session was closed and a toast shown
    LoggedOut,
    /// Logged only
    Silent,
}

/// ErrorReporter turns failed API calls into user notifications
///
/// Every failure still reaches the caller; this only decides what the user
/// sees. A server that stops answering ends the session, at most once per
/// [`NETWORK_DEBOUNCE`] window.
pub struct ErrorReporter {
    toasts: ToastService,
    on_logout: Option<LogoutHook>,
    last_network_failure: Mutex<Option<Instant>>,
}

impl ErrorReporter {
    pub fn new(toasts: ToastService) -> Self {
        Self {
            toasts,
            on_logout: None,
            last_network_failure: Mutex::new(None),
        }
    }

    pub fn with_logout(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_logout = Some(Arc::new(hook));
        self
    }

    /// Errors that are not API failures are left to the caller
    pub fn report(&self, error: &anyhow::Error) -> Reported {
        match error.downcast_ref::<ApiError>() {
            Some(api) => self.report_api(api),
            None => Reported::Silent,
        }
    }

    pub fn report_api(&self, error: &ApiError) -> Reported {
        match error {
            ApiError::Network { message } => {
                if !self.network_failure_is_new() {
                    tracing::debug!(%message, "network failure already reported");
                    return Reported::Silent;
                }
                tracing::error!(%message, "server unavailable, closing the session");
                if let Some(logout) = &self.on_logout {
                    logout();
                }
                self.toasts.error(
                    "Serveur indisponible",
                    Some("Vous avez été déconnecté suite à l'indisponibilité du serveur."),
                    Some(NETWORK_TOAST_DURATION),
                );
                Reported::LoggedOut
            }
            ApiError::Unauthorized { .. } => {
                self.toasts.error(
                    "Non autorisé",
                    Some("Votre session a expiré. Veuillez vous reconnecter."),
                    Some(ERROR_DURATION),
                );
                Reported::Toast
            }
            ApiError::PermissionDenied { message } => {
                tracing::warn!("403 Forbidden: {}", message);
                Reported::Silent
            }
            ApiError::NotFound { message } => {
                self.toasts
                    .error("Ressource introuvable", Some(message), Some(ERROR_DURATION));
                Reported::Toast
            }
            ApiError::Server { status: 500, .. } => {
                self.toasts.error(
                    "Erreur serveur",
                    Some("Une erreur interne est survenue sur le serveur."),
                    Some(ERROR_DURATION),
                );
                Reported::Toast
            }
            ApiError::Server { status, message } => {
                self.toasts.error(
                    &format!("Erreur {}", status),
                    Some(message),
                    Some(ERROR_DURATION),
                );
                Reported::Toast
            }
            ApiError::Validation { field, message } => {
                tracing::debug!(%field, %message, "validation failure");
                Reported::Silent
            }
            ApiError::Decode { details } => {
                tracing::error!(%details, "unreadable API response");
                Reported::Silent
            }
        }
    }

    fn network_failure_is_new(&self) -> bool {
        let mut last = self
            .last_network_failure
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let now = Instant::now();
        match *last {
            Some(previous) if now.duration_since(previous) < NETWORK_DEBOUNCE => false,
            _ => {
                *last = Some(now);
                true
            }
        }
    }
}
