use crate::planning::domain::settings::Theme;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Application areas gated by a permission level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PermissionModule {
    Calendar,
    Releases,
    Admin,
    Absence,
    Playground,
    Blog,
}

impl PermissionModule {
    pub const ALL: [PermissionModule; 6] = [
        PermissionModule::Calendar,
        PermissionModule::Releases,
        PermissionModule::Admin,
        PermissionModule::Absence,
        PermissionModule::Playground,
        PermissionModule::Blog,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PermissionModule::Calendar => "CALENDAR",
            PermissionModule::Releases => "RELEASES",
            PermissionModule::Admin => "ADMIN",
            PermissionModule::Absence => "ABSENCE",
            PermissionModule::Playground => "PLAYGROUND",
            PermissionModule::Blog => "BLOG",
        }
    }

    /// French name shown to users
    pub fn display_name(self) -> &'static str {
        match self {
            PermissionModule::Calendar => "Calendrier",
            PermissionModule::Releases => "Préparation des MEP",
            PermissionModule::Admin => "Administration",
            PermissionModule::Absence => "Absences",
            PermissionModule::Playground => "Playground",
            PermissionModule::Blog => "Blog",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let upper = value.to_ascii_uppercase();
        Self::ALL.into_iter().find(|m| m.as_str() == upper)
    }
}

impl fmt::Display for PermissionModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered access level: `None < Read < Write`
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum PermissionLevel {
    #[default]
    None,
    Read,
    Write,
}

impl PermissionLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            PermissionLevel::None => "NONE",
            PermissionLevel::Read => "READ",
            PermissionLevel::Write => "WRITE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "NONE" => Some(PermissionLevel::None),
            "READ" => Some(PermissionLevel::Read),
            "WRITE" => Some(PermissionLevel::Write),
            _ => None,
        }
    }
}

/// Module to level map; a missing module means `None`.
pub type UserPermissions = BTreeMap<PermissionModule, PermissionLevel>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub theme_preference: Theme,
    /// JSON-encoded list of dashboard widget ids
    #[serde(default)]
    pub widget_order: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<UserPermissions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl User {
    /// `"Jane D."`
    pub fn display_name(&self) -> String {
        display_name(Some(self))
    }

    /// Widget order decoded from its JSON string, empty when unset or invalid.
    pub fn widget_order(&self) -> Vec<String> {
        serde_json::from_str(&self.widget_order).unwrap_or_default()
    }
}

/// Short display name of an optional user, `"Utilisateur"` when there is none.
pub fn display_name(user: Option<&User>) -> String {
    match user {
        Some(user) => {
            let initial = user
                .last_name
                .chars()
                .next()
                .map(|c| format!(" {}.", c))
                .unwrap_or_default();
            format!("{}{}", user.first_name, initial)
        }
        None => "Utilisateur".to_string(),
    }
}

#[cfg(test)]
pub(crate) fn sample_user(permissions: Option<UserPermissions>) -> User {
    User {
        id: "u1".to_string(),
        email: "jane.doe@example.com".to_string(),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        theme_preference: Theme::Light,
        widget_order: "[\"calendar\",\"releases\"]".to_string(),
        permissions,
        created_at: None,
        updated_at: None,
    }
}
