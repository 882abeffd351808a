use super::logged;
use crate::planning::domain::release::required;
use crate::planning::domain::{CustomCategory, CustomTag, Theme, UserPreferences};
use crate::planning::services::category_catalog::slugify;
use crate::planning::services::{CategoryCatalog, TagCatalog};
use crate::ports::outbound::SettingsRepository;
use crate::shared::error::ApiError;
use crate::shared::Result;
use chrono::Utc;
use tokio::sync::watch;

/// SettingsStore holds the user's preferences
///
/// The preferences document is replaced as a whole: every change builds the
/// next document locally, PUTs it and keeps what the server answers.
pub struct SettingsStore<R: SettingsRepository> {
    repository: R,
    preferences: watch::Sender<UserPreferences>,
}

impl<R: SettingsRepository> SettingsStore<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            preferences: watch::Sender::new(UserPreferences::defaults()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<UserPreferences> {
        self.preferences.subscribe()
    }

    pub fn snapshot(&self) -> UserPreferences {
        self.preferences.borrow().clone()
    }

    pub fn catalog(&self) -> CategoryCatalog {
        CategoryCatalog::from_preferences(&self.preferences.borrow())
    }

    pub fn tags(&self) -> TagCatalog {
        TagCatalog::from_preferences(&self.preferences.borrow())
    }

    /// Loads the preferences, keeping the defaults when the request fails
    pub async fn load(&self) -> UserPreferences {
        let preferences = match self.repository.get().await {
            Ok(preferences) => preferences,
            Err(error) => {
                tracing::error!(%error, "failed to load settings, using defaults");
                UserPreferences::defaults()
            }
        };
        self.preferences.send_replace(preferences.clone());
        preferences
    }

    pub async fn update(&self, preferences: UserPreferences) -> Result<UserPreferences> {
        let saved = logged("update settings", self.repository.put(&preferences).await)?;
        self.preferences.send_replace(saved.clone());
        Ok(saved)
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<UserPreferences> {
        let mut next = self.snapshot();
        next.theme = theme;
        self.update(next).await
    }

    pub async fn toggle_theme(&self) -> Result<UserPreferences> {
        let theme = self.preferences.borrow().theme.toggled();
        self.set_theme(theme).await
    }

    /// Back to the defaults, keeping the document's identity
    pub async fn reset_to_defaults(&self) -> Result<UserPreferences> {
        let current = self.snapshot();
        let next = UserPreferences {
            id: current.id,
            created_at: current.created_at,
            ..UserPreferences::defaults()
        };
        self.update(next).await
    }

    pub async fn add_category(
        &self,
        label: &str,
        color: &str,
        icon: &str,
    ) -> Result<CustomCategory> {
        let label = required("label", label)?;
        let category = CustomCategory::new(&label, color, icon, Utc::now());
        let mut next = self.snapshot();
        next.custom_categories.push(category.clone());
        self.update(next).await?;
        Ok(category)
    }

    pub async fn update_category(
        &self,
        id: &str,
        label: &str,
        color: &str,
        icon: &str,
    ) -> Result<CustomCategory> {
        let label = required("label", label)?;
        let mut next = self.snapshot();
        let category = next
            .custom_categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ApiError::NotFound {
                message: format!("Custom category {} does not exist", id),
            })?;
        category.name = slugify(&label);
        category.label = label;
        category.color = color.to_string();
        category.icon = icon.to_string();
        let updated = category.clone();

        self.update(next).await?;
        Ok(updated)
    }

    pub async fn delete_category(&self, id: &str) -> Result<()> {
        let mut next = self.snapshot();
        next.custom_categories.retain(|c| c.id != id);
        self.update(next).await.map(|_| ())
    }

    pub async fn add_tag(&self, label: &str, color: &str) -> Result<CustomTag> {
        let label = required("label", label)?;
        let tag = CustomTag::new(&label, color, Utc::now());
        let mut next = self.snapshot();
        next.custom_tags.push(tag.clone());
        self.update(next).await?;
        Ok(tag)
    }

    pub async fn delete_tag(&self, id: &str) -> Result<()> {
        let mut next = self.snapshot();
        next.custom_tags.retain(|t| t.id != id);
        self.update(next).await.map(|_| ())
    }
}
