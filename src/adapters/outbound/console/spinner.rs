use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// LoadingSpinner shows a stderr spinner while a store is loading
///
/// The spinner lives as long as the handle; dropping it clears the line.
/// indicatif draws nothing when stderr is not a terminal.
pub struct LoadingSpinner {
    task: JoinHandle<()>,
}

impl LoadingSpinner {
    pub fn follow(mut loading: watch::Receiver<bool>, message: &str) -> Self {
        let message = message.to_string();
        let task = tokio::spawn(async move {
            let mut bar: Option<Spinner> = None;
            loop {
                let active = *loading.borrow_and_update();
                if active && bar.is_none() {
                    bar = Some(Spinner::start(&message));
                } else if !active {
                    bar = None;
                }
                if loading.changed().await.is_err() {
                    break;
                }
            }
        });
        Self { task }
    }

    pub fn finish(self) {}

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for LoadingSpinner {
    fn drop(&mut self) {
        self.task.abort();
    }
}

struct Spinner(ProgressBar);

impl Spinner {
    fn start(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self(bar)
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.0.finish_and_clear();
    }
}
