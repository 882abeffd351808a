use crate::application::ui::{Toast, ToastKind};
use owo_colors::OwoColorize;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// ConsoleToastRenderer prints notifications to stderr
///
/// Each toast is printed once, when it first shows up in the list; expiry
/// is silent.
pub struct ConsoleToastRenderer {
    colored: bool,
    printed: Mutex<HashSet<String>>,
}

impl ConsoleToastRenderer {
    /// Colours are off when `NO_COLOR` is set
    pub fn new() -> Self {
        Self::with_colors(std::env::var_os("NO_COLOR").is_none())
    }

    pub fn with_colors(colored: bool) -> Self {
        Self {
            colored,
            printed: Mutex::new(HashSet::new()),
        }
    }

    pub fn render(&self, toast: &Toast) -> String {
        let (icon, title) = match toast.kind {
            ToastKind::Success => ("✔", self.paint(&toast.title, |t| t.green().bold().to_string())),
            ToastKind::Error => ("✖", self.paint(&toast.title, |t| t.red().bold().to_string())),
            ToastKind::Warning => ("⚠", self.paint(&toast.title, |t| t.yellow().bold().to_string())),
            ToastKind::Info => ("ℹ", self.paint(&toast.title, |t| t.cyan().bold().to_string())),
        };
        let mut line = format!("{} {}", icon, title);
        if let Some(message) = &toast.message {
            line.push_str(": ");
            line.push_str(message);
        }
        if let Some(label) = &toast.action_label {
            line.push_str(&format!(" [{}]", label));
        }
        line
    }

    /// Lines for the toasts not printed yet; forgets the ones gone from `toasts`
    pub fn take_new(&self, toasts: &[Toast]) -> Vec<String> {
        let mut printed = self
            .printed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        printed.retain(|id| toasts.iter().any(|t| &t.id == id));
        toasts
            .iter()
            .filter(|t| printed.insert(t.id.clone()))
            .map(|t| self.render(t))
            .collect()
    }

    pub fn print_new(&self, toasts: &[Toast]) {
        for line in self.take_new(toasts) {
            eprintln!("{}", line);
        }
    }

    /// Prints toasts as they are added, until the service goes away
    pub fn spawn(self: Arc<Self>, mut toasts: watch::Receiver<Vec<Toast>>) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                let current = toasts.borrow_and_update().clone();
                self.print_new(&current);
                if toasts.changed().await.is_err() {
                    break;
                }
            }
        })
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> String) -> String {
        if self.colored {
            style(text)
        } else {
            text.to_string()
        }
    }
}

impl Default for ConsoleToastRenderer {
    fn default() -> Self {
        Self::new()
    }
}
