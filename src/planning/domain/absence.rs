use crate::shared::error::ApiError;
use crate::shared::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AbsenceType {
    Absence,
    Formation,
    Teletravail,
}

impl AbsenceType {
    pub fn label(self) -> &'static str {
        match self {
            AbsenceType::Absence => "Absence",
            AbsenceType::Formation => "Formation / Hors MB",
            AbsenceType::Teletravail => "Télétravail",
        }
    }
}

/// Half of a working day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Period {
    Morning,
    Afternoon,
}

impl Period {
    pub fn label(self) -> &'static str {
        match self {
            Period::Morning => "Matin",
            Period::Afternoon => "Après-midi",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Absence {
    pub id: String,
    pub user_id: String,
    pub user_first_name: String,
    pub user_last_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(rename = "type")]
    pub absence_type: AbsenceType,
    pub start_period: Period,
    pub end_period: Period,
}

impl Absence {
    pub fn user_name(&self) -> String {
        format!("{} {}", self.user_first_name, self.user_last_name)
    }
}

/// Create/update payload. `user_id` is only set by admins acting for someone else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsenceRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(rename = "type")]
    pub absence_type: AbsenceType,
    pub start_period: Period,
    pub end_period: Period,
}

impl AbsenceRequest {
    pub fn validated(self) -> Result<Self> {
        if self.start_date > self.end_date {
            return Err(ApiError::validation(
                "endDate",
                "End date must not be before the start date",
            )
            .into());
        }
        if self.start_date == self.end_date
            && self.start_period == Period::Afternoon
            && self.end_period == Period::Morning
        {
            return Err(ApiError::validation(
                "endPeriod",
                "A single-day absence cannot start in the afternoon and end in the morning",
            )
            .into());
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsenceUser {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub metier: String,
    #[serde(default)]
    pub tribu: String,
    #[serde(default)]
    pub interne: bool,
    pub email: String,
    #[serde(default)]
    pub squads: Vec<String>,
}
