use crate::planning::domain::user::UserPermissions;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_preference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tribu: Option<String>,
    #[serde(default)]
    pub interne: bool,
    #[serde(default)]
    pub squads: Vec<String>,
    #[serde(default)]
    pub histories_count: u64,
    #[serde(default)]
    pub permissions: UserPermissions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_users: u64,
    pub total_events: u64,
    pub total_releases: u64,
    pub total_history_entries: u64,
}

/// Full database dump, passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatabaseExport(pub Value);

impl DatabaseExport {
    /// Number of records per top-level collection, for summaries.
    pub fn collection_sizes(&self) -> Vec<(String, usize)> {
        match &self.0 {
            Value::Object(map) => map
                .iter()
                .filter_map(|(k, v)| v.as_array().map(|a| (k.clone(), a.len())))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Server reply to a database import
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub imported: Option<Value>,
}
