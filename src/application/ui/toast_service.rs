use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use uuid::Uuid;

pub const DEFAULT_DURATION: Duration = Duration::from_millis(5000);
pub const ERROR_DURATION: Duration = Duration::from_millis(7000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    pub id: String,
    pub kind: ToastKind,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Label of the button offered with a warning
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_label: Option<String>,
    /// Zero keeps the toast until it is dismissed
    #[serde(with = "duration_millis")]
    pub duration: Duration,
    pub created_at: DateTime<Utc>,
}

impl Toast {
    pub fn is_sticky(&self) -> bool {
        self.duration.is_zero()
    }
}

/// ToastService keeps the list of visible notifications
///
/// Toasts dismiss themselves once their duration has elapsed. Cloning the
/// service shares the same list.
#[derive(Clone)]
pub struct ToastService {
    toasts: Arc<watch::Sender<Vec<Toast>>>,
}

impl ToastService {
    pub fn new() -> Self {
        Self {
            toasts: Arc::new(watch::Sender::new(Vec::new())),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Toast>> {
        self.toasts.subscribe()
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.borrow().clone()
    }

    pub fn success(&self, title: &str, message: Option<&str>, duration: Option<Duration>) -> String {
        self.show(ToastKind::Success, title, message, duration, None)
    }

    pub fn error(&self, title: &str, message: Option<&str>, duration: Option<Duration>) -> String {
        self.show(
            ToastKind::Error,
            title,
            message,
            Some(duration.unwrap_or(ERROR_DURATION)),
            None,
        )
    }

    pub fn warning(
        &self,
        title: &str,
        message: Option<&str>,
        duration: Option<Duration>,
        action_label: Option<&str>,
    ) -> String {
        self.show(ToastKind::Warning, title, message, duration, action_label)
    }

    pub fn info(&self, title: &str, message: Option<&str>, duration: Option<Duration>) -> String {
        self.show(ToastKind::Info, title, message, duration, None)
    }

    /// Adds a toast and returns its id
    ///
    /// Outside a tokio runtime the toast cannot expire and stays until dismissed.
    pub fn show(
        &self,
        kind: ToastKind,
        title: &str,
        message: Option<&str>,
        duration: Option<Duration>,
        action_label: Option<&str>,
    ) -> String {
        let toast = Toast {
            id: format!("toast-{}", Uuid::new_v4()),
            kind,
            title: title.to_string(),
            message: message.map(str::to_string),
            action_label: action_label.map(str::to_string),
            duration: duration.unwrap_or(DEFAULT_DURATION),
            created_at: Utc::now(),
        };
        let id = toast.id.clone();
        let duration = toast.duration;
        self.toasts.send_modify(|toasts| toasts.push(toast));

        if !duration.is_zero() {
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    let toasts = Arc::clone(&self.toasts);
                    let expired = id.clone();
                    handle.spawn(async move {
                        tokio::time::sleep(duration).await;
                        remove(&toasts, &expired);
                    });
                }
                Err(_) => tracing::debug!(id, "no runtime, toast will not expire"),
            }
        }
        id
    }

    pub fn dismiss(&self, id: &str) {
        remove(&self.toasts, id);
    }

    pub fn dismiss_all(&self) {
        self.toasts.send_if_modified(|toasts| {
            let changed = !toasts.is_empty();
            toasts.clear();
            changed
        });
    }
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

fn remove(toasts: &watch::Sender<Vec<Toast>>, id: &str) {
    toasts.send_if_modified(|list| {
        let before = list.len();
        list.retain(|t| t.id != id);
        list.len() != before
    });
}

mod duration_millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_toast_expires_after_default_duration() {
        let service = ToastService::new();
        let id = service.success("Enregistré", None, None);
        assert!(id.starts_with("toast-"));
        assert_eq!(service.toasts().len(), 1);

        tokio::time::sleep(Duration::from_millis(4999)).await;
        assert_eq!(service.toasts().len(), 1);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(service.toasts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_toast_lasts_longer() {
        let service = ToastService::new();
        service.error("Erreur", Some("détail"), None);

        tokio::time::sleep(Duration::from_millis(6000)).await;
        assert_eq!(service.toasts().len(), 1);
        assert_eq!(service.toasts()[0].duration, ERROR_DURATION);

        tokio::time::sleep(Duration::from_millis(1001)).await;
        assert!(service.toasts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_explicit_duration_and_sticky() {
        let service = ToastService::new();
        service.info("Bref", None, Some(Duration::from_millis(100)));
        let sticky = service.warning("Collant", None, Some(Duration::ZERO), Some("Annuler"));

        tokio::time::sleep(Duration::from_secs(60)).await;
        let remaining = service.toasts();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, sticky);
        assert!(remaining[0].is_sticky());
        assert_eq!(remaining[0].action_label.as_deref(), Some("Annuler"));
    }

    #[tokio::test]
    async fn test_dismiss_and_dismiss_all() {
        let service = ToastService::new();
        let first = service.info("Un", None, None);
        service.info("Deux", None, None);

        service.dismiss(&first);
        assert_eq!(service.toasts().len(), 1);
        assert_eq!(service.toasts()[0].title, "Deux");

        service.dismiss_all();
        assert!(service.toasts().is_empty());
    }

    #[test]
    fn test_without_runtime_toast_stays() {
        let service = ToastService::new();
        service.success("Hors runtime", None, None);
        assert_eq!(service.toasts().len(), 1);
    }
}
