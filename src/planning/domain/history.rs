use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryAction {
    Create,
    Update,
    Delete,
}

impl HistoryAction {
    pub fn as_str(self) -> &'static str {
        match self {
            HistoryAction::Create => "create",
            HistoryAction::Update => "update",
            HistoryAction::Delete => "delete",
        }
    }
}

/// Which audit trail a history operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryKind {
    Events,
    Releases,
}

impl HistoryKind {
    /// Resource name on the planning API
    pub fn resource(self) -> &'static str {
        match self {
            HistoryKind::Events => "history",
            HistoryKind::Releases => "release-history",
        }
    }
}

/// Audit entry for an event change. Payloads are kept as the server sent them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub action: HistoryAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_display_name: Option<String>,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseHistoryEntry {
    pub id: String,
    pub action: HistoryAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_display_name: Option<String>,
    pub timestamp: String,
}

/// Either kind of audit entry, as returned by the history port.
///
/// Only serialized: the port decodes the variant matching the requested kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AuditEntry {
    Event(HistoryEntry),
    Release(ReleaseHistoryEntry),
}

impl AuditEntry {
    pub fn id(&self) -> &str {
        match self {
            AuditEntry::Event(e) => &e.id,
            AuditEntry::Release(r) => &r.id,
        }
    }

    pub fn action(&self) -> HistoryAction {
        match self {
            AuditEntry::Event(e) => e.action,
            AuditEntry::Release(r) => r.action,
        }
    }

    pub fn timestamp(&self) -> &str {
        match self {
            AuditEntry::Event(e) => &e.timestamp,
            AuditEntry::Release(r) => &r.timestamp,
        }
    }

    pub fn author(&self) -> &str {
        let name = match self {
            AuditEntry::Event(e) => e.user_display_name.as_deref(),
            AuditEntry::Release(r) => r.user_display_name.as_deref(),
        };
        name.unwrap_or("Utilisateur")
    }

    /// Title or name of the changed entity, from the newest payload available
    pub fn subject(&self) -> Option<String> {
        let (data, previous, key) = match self {
            AuditEntry::Event(e) => (&e.event_data, &e.previous_data, "title"),
            AuditEntry::Release(r) => (&r.release_data, &r.previous_data, "name"),
        };
        data.as_ref()
            .or(previous.as_ref())
            .and_then(|v| v.get(key))
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resource_names() {
        assert_eq!(HistoryKind::Events.resource(), "history");
        assert_eq!(HistoryKind::Releases.resource(), "release-history");
    }

    #[test]
    fn test_entry_keeps_payload_verbatim() {
        let entry: HistoryEntry = serde_json::from_value(json!({
            "id": "h1",
            "action": "update",
            "eventId": "e1",
            "eventData": { "title": "MEP", "unknownField": 42 },
            "timestamp": "2025-01-01T10:00:00"
        }))
        .unwrap();
        assert_eq!(entry.event_data.as_ref().unwrap()["unknownField"], 42);

        let audit = AuditEntry::Event(entry);
        assert_eq!(audit.subject().as_deref(), Some("MEP"));
        assert_eq!(audit.author(), "Utilisateur");
        assert_eq!(audit.action(), HistoryAction::Update);
    }

    #[test]
    fn test_release_subject_falls_back_to_previous_data() {
        let audit = AuditEntry::Release(ReleaseHistoryEntry {
            id: "rh1".to_string(),
            action: HistoryAction::Delete,
            release_id: Some("r1".to_string()),
            release_data: None,
            previous_data: Some(json!({ "name": "Release 24.4" })),
            user_id: None,
            user_display_name: Some("Jane D.".to_string()),
            timestamp: "2025-01-01T10:00:00".to_string(),
        });
        assert_eq!(audit.subject().as_deref(), Some("Release 24.4"));
        assert_eq!(audit.author(), "Jane D.");
    }
}
