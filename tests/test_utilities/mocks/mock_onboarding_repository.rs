use std::sync::{Arc, Mutex};
use event_planner::prelude::*;

/// OnboardingRepository with a fixed set of seen keys
#[derive(Clone, Default)]
pub struct MockOnboardingRepository {
    pub seen: Vec<String>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_writes: bool,
}

impl MockOnboardingRepository {
    pub fn new(seen: &[&str]) -> Self {
        Self {
            seen: seen.iter().map(|k| k.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with_failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) -> Result<()> {
        self.calls.lock().unwrap().push(call.into());
        if self.fail_writes {
            return Err(ApiError::Network {
                message: "connection reset".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl OnboardingRepository for MockOnboardingRepository {
    async fn seen_keys(&self) -> Result<Vec<String>> {
        self.calls.lock().unwrap().push("seen_keys".to_string());
        Ok(self.seen.clone())
    }

    async fn mark_seen(&self, key: &str) -> Result<()> {
        self.record(format!("mark_seen {}", key))
    }

    async fn skip_all(&self) -> Result<()> {
        self.record("skip_all")
    }
}
