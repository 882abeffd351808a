use std::sync::{Arc, Mutex};
use event_planner::prelude::*;

/// SettingsRepository keeping the last document it was sent
#[derive(Clone, Default)]
pub struct MockSettingsRepository {
    pub stored: Arc<Mutex<UserPreferences>>,
    pub puts: Arc<Mutex<Vec<UserPreferences>>>,
    pub fail_get: bool,
}

impl MockSettingsRepository {
    pub fn new(stored: UserPreferences) -> Self {
        Self {
            stored: Arc::new(Mutex::new(stored)),
            ..Self::default()
        }
    }

    /// Reading the preferences fails with a 500
    pub fn with_failing_get(mut self) -> Self {
        self.fail_get = true;
        self
    }

    pub fn puts(&self) -> Vec<UserPreferences> {
        self.puts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SettingsRepository for MockSettingsRepository {
    async fn get(&self) -> Result<UserPreferences> {
        if self.fail_get {
            return Err(ApiError::from_status(500, None).into());
        }
        Ok(self.stored.lock().unwrap().clone())
    }

    async fn put(&self, preferences: &UserPreferences) -> Result<UserPreferences> {
        self.puts.lock().unwrap().push(preferences.clone());
        let mut saved = preferences.clone();
        saved.updated_at = Some("2025-03-01T10:00:00Z".to_string());
        *self.stored.lock().unwrap() = saved.clone();
        Ok(saved)
    }
}
