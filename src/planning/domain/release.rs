use crate::shared::error::ApiError;
use crate::shared::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseStatus {
    Draft,
    InProgress,
    Completed,
    Cancelled,
}

impl ReleaseStatus {
    pub fn label(self) -> &'static str {
        match self {
            ReleaseStatus::Draft => "Brouillon",
            ReleaseStatus::InProgress => "En cours",
            ReleaseStatus::Completed => "Terminée",
            ReleaseStatus::Cancelled => "Annulée",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(ReleaseStatus::Draft),
            "in_progress" => Some(ReleaseStatus::InProgress),
            "completed" => Some(ReleaseStatus::Completed),
            "cancelled" => Some(ReleaseStatus::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionPhase {
    PreMep,
    PostMep,
}

impl ActionPhase {
    pub fn label(self) -> &'static str {
        match self {
            ActionPhase::PreMep => "Pré-MEP",
            ActionPhase::PostMep => "Post-MEP",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    FeatureFlipping,
    MemoryFlipping,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Pending,
    Completed,
}

impl ActionStatus {
    pub fn toggled(self) -> Self {
        match self {
            ActionStatus::Pending => ActionStatus::Completed,
            ActionStatus::Completed => ActionStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlippingType {
    FeatureFlipping,
    MemoryFlipping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleAction {
    CreateRule,
    ObsoleteRule,
    DisableRule,
    EnableRule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleState {
    Enabled,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetOs {
    Ios,
    Android,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VersionOperator {
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
}

impl VersionOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            VersionOperator::GreaterOrEqual => ">=",
            VersionOperator::LessOrEqual => "<=",
            VersionOperator::Greater => ">",
            VersionOperator::Less => "<",
            VersionOperator::Equal => "=",
            VersionOperator::NotEqual => "!=",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionCondition {
    pub operator: VersionOperator,
    pub version: String,
}

/// Feature/memory flipping rule attached to an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlipping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub flipping_type: FlippingType,
    pub rule_name: String,
    pub theme: String,
    pub rule_action: RuleAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_state: Option<RuleState>,
    #[serde(default)]
    pub target_clients: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_caisses: Option<String>,
    #[serde(default, rename = "targetOS")]
    pub target_os: Vec<TargetOs>,
    #[serde(default)]
    pub target_versions: Vec<VersionCondition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: String,
    pub squad_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: String,
    pub squad_id: String,
    pub phase: ActionPhase,
    #[serde(rename = "type")]
    pub action_type: ActionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: String,
    pub status: ActionStatus,
    #[serde(default)]
    pub order: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flipping: Option<FeatureFlipping>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Squad {
    pub id: String,
    pub release_id: String,
    /// 1 to 6
    pub squad_number: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tonton_mep: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub features_empty_confirmed: bool,
    #[serde(default)]
    pub pre_mep_empty_confirmed: bool,
    #[serde(default)]
    pub post_mep_empty_confirmed: bool,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Squad {
    pub fn actions_in(&self, phase: ActionPhase) -> impl Iterator<Item = &Action> {
        self.actions.iter().filter(move |a| a.phase == phase)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    pub id: String,
    pub name: String,
    pub version: String,
    pub release_date: NaiveDate,
    pub status: ReleaseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub squads: Vec<Squad>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Release {
    /// Fraction of completed squads, `0.0` for a release without squads.
    pub fn completion(&self) -> f64 {
        if self.squads.is_empty() {
            return 0.0;
        }
        let done = self.squads.iter().filter(|s| s.is_completed).count();
        done as f64 / self.squads.len() as f64
    }

    pub fn find_action(&self, action_id: &str) -> Option<&Action> {
        self.squads
            .iter()
            .flat_map(|s| s.actions.iter())
            .find(|a| a.id == action_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRelease {
    pub name: String,
    pub version: String,
    pub release_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateRelease {
    pub fn validated(mut self) -> Result<Self> {
        self.name = required("name", &self.name)?;
        self.version = required("version", &self.version)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRelease {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReleaseStatus>,
}

impl UpdateRelease {
    pub fn status(status: ReleaseStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Fields that are present must not be blank.
    pub fn validated(mut self) -> Result<Self> {
        if let Some(name) = &self.name {
            self.name = Some(required("name", name)?);
        }
        if let Some(version) = &self.version {
            self.version = Some(required("version", version)?);
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSquad {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tonton_mep: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features_empty_confirmed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_mep_empty_confirmed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_mep_empty_confirmed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeature {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateFeature {
    pub fn validated(mut self) -> Result<Self> {
        self.title = required("title", &self.title)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAction {
    pub phase: ActionPhase,
    #[serde(rename = "type")]
    pub action_type: ActionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flipping: Option<FeatureFlipping>,
}

impl CreateAction {
    pub fn validated(mut self) -> Result<Self> {
        self.description = required("description", &self.description)?;
        Ok(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ActionStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flipping: Option<FeatureFlipping>,
}

impl UpdateAction {
    pub fn validated(mut self) -> Result<Self> {
        if let Some(description) = &self.description {
            self.description = Some(required("description", description)?);
        }
        Ok(self)
    }
}

/// Trims `value`, rejecting it when nothing is left.
pub(crate) fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(field, format!("{} is required", field)).into());
    }
    Ok(trimmed.to_string())
}
