use crate::shared::error::PlannerError;
use crate::shared::Result;
use serde::Serialize;
use std::sync::Mutex;
use tokio::sync::{oneshot, watch};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationOptions {
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    pub cancel_text: String,
    /// Irreversible action, rendered in red
    pub danger: bool,
}

impl ConfirmationOptions {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_text: "Confirmer".to_string(),
            cancel_text: "Annuler".to_string(),
            danger: false,
        }
    }

    pub fn danger(mut self) -> Self {
        self.danger = true;
        self
    }

    pub fn with_confirm_text(mut self, text: impl Into<String>) -> Self {
        self.confirm_text = text.into();
        self
    }

    pub fn with_cancel_text(mut self, text: impl Into<String>) -> Self {
        self.cancel_text = text.into();
        self
    }
}

/// ConfirmationService asks one yes/no question at a time
///
/// `confirm` publishes the request and waits; whoever renders it answers
/// through `respond` or `dismiss`.
pub struct ConfirmationService {
    pending: Mutex<Option<oneshot::Sender<bool>>>,
    current: watch::Sender<Option<ConfirmationOptions>>,
}

impl ConfirmationService {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(None),
            current: watch::Sender::new(None),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<ConfirmationOptions>> {
        self.current.subscribe()
    }

    pub fn current(&self) -> Option<ConfirmationOptions> {
        self.current.borrow().clone()
    }

    /// Resolves to the user's answer
    ///
    /// Fails with `PlannerError::ConfirmationPending` while another request
    /// is still waiting. A request dropped without an answer reads as `false`.
    pub async fn confirm(&self, options: ConfirmationOptions) -> Result<bool> {
        let receiver = {
            let mut pending = self.lock();
            if pending.as_ref().is_some_and(|tx| !tx.is_closed()) {
                return Err(PlannerError::ConfirmationPending.into());
            }
            let (tx, rx) = oneshot::channel();
            *pending = Some(tx);
            tracing::debug!(title = %options.title, "confirmation requested");
            self.current.send_replace(Some(options));
            rx
        };

        let mut waiting = Waiting {
            service: self,
            receiver,
            answered: false,
        };
        let answer = (&mut waiting.receiver).await.unwrap_or(false);
        waiting.answered = true;
        Ok(answer)
    }

    pub fn respond(&self, confirmed: bool) {
        let sender = {
            let mut pending = self.lock();
            self.current.send_replace(None);
            pending.take()
        };
        match sender {
            Some(tx) => {
                if tx.send(confirmed).is_err() {
                    tracing::debug!("confirmation answered after the caller gave up");
                }
            }
            None => tracing::debug!("no confirmation waiting for an answer"),
        }
    }

    /// Same as answering no
    pub fn dismiss(&self) {
        self.respond(false);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<oneshot::Sender<bool>>> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Withdraws the published request when `confirm` is dropped unanswered
struct Waiting<'a> {
    service: &'a ConfirmationService,
    receiver: oneshot::Receiver<bool>,
    answered: bool,
}

impl Drop for Waiting<'_> {
    fn drop(&mut self) {
        if self.answered {
            return;
        }
        self.receiver.close();
        let mut pending = self.service.lock();
        // A live sender belongs to a newer request
        if pending.as_ref().is_some_and(|tx| tx.is_closed()) {
            *pending = None;
            self.service.current.send_replace(None);
            tracing::debug!("confirmation abandoned");
        }
    }
}

impl Default for ConfirmationService {
    fn default() -> Self {
        Self::new()
    }
}
