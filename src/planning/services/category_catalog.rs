use crate::planning::domain::{CustomCategory, CustomTag, EventCategory, UserPreferences};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const FALLBACK_COLOR: &str = "#8b5cf6";
pub const FALLBACK_ICON: &str = "event";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryEntry {
    pub id: String,
    pub label: String,
    pub color: String,
    pub dark_color: String,
    pub icon: String,
    pub is_custom: bool,
}

/// Built-in categories followed by the user's custom ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCatalog {
    entries: Vec<CategoryEntry>,
}

impl CategoryCatalog {
    pub fn from_preferences(prefs: &UserPreferences) -> Self {
        let defaults = EventCategory::ALL.into_iter().map(|c| CategoryEntry {
            id: c.id().to_string(),
            label: c.label().to_string(),
            color: c.color().to_string(),
            dark_color: c.dark_color().to_string(),
            icon: c.icon().to_string(),
            is_custom: false,
        });
        let custom = prefs.custom_categories.iter().map(|c| CategoryEntry {
            id: c.id.clone(),
            label: c.label.clone(),
            color: c.color.clone(),
            dark_color: c.color.clone(),
            icon: c.icon.clone(),
            is_custom: true,
        });
        Self {
            entries: defaults.chain(custom).collect(),
        }
    }

    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&CategoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Label of the category, the id itself when unknown.
    pub fn label(&self, id: &str) -> String {
        self.get(id)
            .map(|e| e.label.clone())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn color(&self, id: &str) -> String {
        self.get(id)
            .map(|e| e.color.clone())
            .unwrap_or_else(|| FALLBACK_COLOR.to_string())
    }

    pub fn dark_color(&self, id: &str) -> String {
        self.get(id)
            .map(|e| e.dark_color.clone())
            .unwrap_or_else(|| FALLBACK_COLOR.to_string())
    }

    pub fn icon(&self, id: &str) -> String {
        self.get(id)
            .map(|e| e.icon.clone())
            .unwrap_or_else(|| FALLBACK_ICON.to_string())
    }
}

/// `"Mise à jour infra"` -> `"mise_à_jour_infra"`
pub fn slugify(label: &str) -> String {
    label
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

impl CustomCategory {
    pub fn new(label: &str, color: &str, icon: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: format!("custom_{}", now.timestamp_millis()),
            name: slugify(label),
            label: label.to_string(),
            color: color.to_string(),
            icon: icon.to_string(),
            created_at: now.to_rfc3339(),
        }
    }
}

impl CustomTag {
    pub fn new(label: &str, color: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: format!("tag_{}", now.timestamp_millis()),
            name: slugify(label),
            label: label.to_string(),
            color: color.to_string(),
            icon: None,
        }
    }
}

/// Lookups over the user's custom tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagCatalog {
    tags: Vec<CustomTag>,
}

impl TagCatalog {
    pub fn from_preferences(prefs: &UserPreferences) -> Self {
        Self {
            tags: prefs.custom_tags.clone(),
        }
    }

    pub fn tags(&self) -> &[CustomTag] {
        &self.tags
    }

    pub fn label(&self, id: &str) -> String {
        self.tags
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.label.clone())
            .unwrap_or_else(|| id.to_string())
    }

    pub fn color(&self, id: &str) -> Option<String> {
        self.tags.iter().find(|t| t.id == id).map(|t| t.color.clone())
    }
}
