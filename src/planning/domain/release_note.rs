use super::release::required;
use crate::shared::error::ApiError;
use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Squads a microservice or a release note entry can belong to
pub const SQUAD_OPTIONS: [&str; 6] = [
    "Squad 1", "Squad 2", "Squad 3", "Squad 4", "Squad 5", "Squad 6",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeploymentStatus {
    Hom2,
    InProgressProd,
    DeployedProd,
    Rollback,
}

impl DeploymentStatus {
    pub fn label(self) -> &'static str {
        match self {
            DeploymentStatus::Hom2 => "HOM2",
            DeploymentStatus::InProgressProd => "En cours de MEP",
            DeploymentStatus::DeployedProd => "En production",
            DeploymentStatus::Rollback => "Rollback",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_uppercase().as_str() {
            "HOM2" => Some(DeploymentStatus::Hom2),
            "IN_PROGRESS_PROD" => Some(DeploymentStatus::InProgressProd),
            "DEPLOYED_PROD" => Some(DeploymentStatus::DeployedProd),
            "ROLLBACK" => Some(DeploymentStatus::Rollback),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeItem {
    pub jira_id: String,
    pub description: String,
}

impl ChangeItem {
    /// Parses `JIRA-123:description`; without a colon the whole text is the description
    pub fn parse(value: &str) -> Self {
        match value.split_once(':') {
            Some((jira_id, description)) => Self {
                jira_id: jira_id.trim().to_string(),
                description: description.trim().to_string(),
            },
            None => Self {
                jira_id: String::new(),
                description: value.trim().to_string(),
            },
        }
    }

    fn is_blank(&self) -> bool {
        self.jira_id.trim().is_empty() && self.description.trim().is_empty()
    }
}

/// One deployed microservice in a release note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseNoteEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub release_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub microservice_id: Option<String>,
    /// Free-text name, used when the entry is not linked to a microservice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub microservice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub microservice_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    pub squad: String,
    #[serde(default)]
    pub part_en_mep: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deploy_order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Tag currently in production
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_version: Option<String>,
    #[serde(default)]
    pub changes: Vec<ChangeItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DeploymentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl ReleaseNoteEntry {
    pub fn display_name(&self) -> &str {
        self.microservice_name
            .as_deref()
            .or(self.microservice.as_deref())
            .unwrap_or("?")
    }
}

/// Deployment order: entries without an order last, then by squad and name
pub fn sort_for_deployment(entries: &mut [ReleaseNoteEntry]) {
    entries.sort_by(|a, b| {
        let order = match (a.deploy_order, b.deploy_order) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        order
            .then_with(|| a.squad.cmp(&b.squad))
            .then_with(|| a.display_name().cmp(b.display_name()))
    });
}

/// Create/update payload for a release note entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseNoteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub microservice_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub microservice: Option<String>,
    pub squad: String,
    #[serde(default)]
    pub part_en_mep: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deploy_order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_version: Option<String>,
    #[serde(default)]
    pub changes: Vec<ChangeItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<DeploymentStatus>,
}

impl ReleaseNoteRequest {
    /// Needs a squad and a microservice (linked or by name); blank changes are dropped.
    pub fn validated(mut self) -> Result<Self> {
        self.squad = required("squad", &self.squad)?;
        self.microservice_id = self
            .microservice_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());
        self.microservice = self
            .microservice
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        if self.microservice_id.is_none() && self.microservice.is_none() {
            return Err(ApiError::validation("microservice", "microservice is required").into());
        }
        self.changes.retain(|change| !change.is_blank());
        Ok(self)
    }
}

/// Release note export rendered by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteExportFormat {
    Markdown,
    Html,
}

impl NoteExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            NoteExportFormat::Markdown => "markdown",
            NoteExportFormat::Html => "html",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            NoteExportFormat::Markdown => "md",
            NoteExportFormat::Html => "html",
        }
    }
}

impl std::str::FromStr for NoteExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(NoteExportFormat::Markdown),
            "html" => Ok(NoteExportFormat::Html),
            _ => Err(format!(
                "Invalid release note format: {}. Use 'markdown' or 'html'",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Microservice {
    pub id: String,
    pub name: String,
    pub squad: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Only filled when listing for a release
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

fn active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMicroservice {
    pub name: String,
    pub squad: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateMicroservice {
    pub fn validated(mut self) -> Result<Self> {
        self.name = required("name", &self.name)?;
        self.squad = squad(&self.squad)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMicroservice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub squad: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpdateMicroservice {
    pub fn validated(mut self) -> Result<Self> {
        if let Some(name) = &self.name {
            self.name = Some(required("name", name)?);
        }
        if let Some(value) = &self.squad {
            self.squad = Some(squad(value)?);
        }
        Ok(self)
    }
}

fn squad(value: &str) -> Result<String> {
    let value = required("squad", value)?;
    if !SQUAD_OPTIONS.contains(&value.as_str()) {
        return Err(ApiError::validation(
            "squad",
            format!("'{}' is not one of Squad 1 to Squad 6", value),
        )
        .into());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, squad: &str, order: Option<i32>) -> ReleaseNoteEntry {
        serde_json::from_value(serde_json::json!({
            "releaseId": "r1",
            "microservice": name,
            "squad": squad,
            "deployOrder": order,
        }))
        .unwrap()
    }

    #[test]
    fn test_missing_changes_read_as_empty() {
        let entry: ReleaseNoteEntry = serde_json::from_value(serde_json::json!({
            "id": "n1",
            "releaseId": "r1",
            "microserviceName": "auth-service",
            "squad": "Squad 1",
            "partEnMep": true,
            "status": "IN_PROGRESS_PROD"
        }))
        .unwrap();
        assert!(entry.changes.is_empty());
        assert_eq!(entry.status, Some(DeploymentStatus::InProgressProd));
        assert_eq!(entry.display_name(), "auth-service");
    }

    #[test]
    fn test_unordered_entries_sort_last() {
        let mut entries = vec![
            entry("zeta", "Squad 2", None),
            entry("beta", "Squad 1", Some(2)),
            entry("alpha", "Squad 2", None),
            entry("gamma", "Squad 3", Some(1)),
            entry("delta", "Squad 1", None),
        ];
        sort_for_deployment(&mut entries);
        let names: Vec<_> = entries.iter().map(|e| e.display_name()).collect();
        assert_eq!(names, vec!["gamma", "beta", "delta", "alpha", "zeta"]);
    }

    #[test]
    fn test_request_needs_a_microservice() {
        let request = ReleaseNoteRequest {
            microservice: Some("  ".to_string()),
            squad: "Squad 1".to_string(),
            ..ReleaseNoteRequest::default()
        };
        let err = request.validated().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::Validation { field, .. }) if field == "microservice"
        ));
    }

    #[test]
    fn test_request_drops_blank_changes() {
        let request = ReleaseNoteRequest {
            microservice_id: Some("ms-1".to_string()),
            squad: " Squad 2 ".to_string(),
            changes: vec![ChangeItem::parse("PAY-12: Nouveau virement"), ChangeItem::parse(" ")],
            ..ReleaseNoteRequest::default()
        };
        let request = request.validated().unwrap();
        assert_eq!(request.squad, "Squad 2");
        assert_eq!(
            request.changes,
            vec![ChangeItem {
                jira_id: "PAY-12".to_string(),
                description: "Nouveau virement".to_string(),
            }]
        );
    }

    #[test]
    fn test_microservice_squad_must_be_known() {
        let dto = CreateMicroservice {
            name: "payment-service".to_string(),
            squad: "Squad 9".to_string(),
            solution: None,
            display_order: None,
            description: None,
        };
        assert!(dto.validated().is_err());

        let update = UpdateMicroservice {
            is_active: Some(false),
            ..UpdateMicroservice::default()
        };
        let json = serde_json::to_value(update.validated().unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({ "isActive": false }));
    }

    #[test]
    fn test_note_export_format_parsing() {
        assert_eq!("md".parse::<NoteExportFormat>().unwrap(), NoteExportFormat::Markdown);
        assert_eq!("HTML".parse::<NoteExportFormat>().unwrap(), NoteExportFormat::Html);
        assert!("pdf".parse::<NoteExportFormat>().is_err());
    }
}
