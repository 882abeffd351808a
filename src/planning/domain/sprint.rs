use crate::planning::domain::release::required;
use crate::shared::error::ApiError;
use crate::shared::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub code_freeze_date: NaiveDate,
    pub release_date_back: NaiveDate,
    pub release_date_front: NaiveDate,
}

impl Sprint {
    pub fn validated(mut self) -> Result<Self> {
        self.name = required("name", &self.name)?;
        if self.start_date > self.end_date {
            return Err(ApiError::validation(
                "endDate",
                "End date must not be before the start date",
            )
            .into());
        }
        Ok(self)
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }
}

/// Admin-declared non-working day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosedDay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub date: NaiveDate,
    pub reason: String,
}

impl ClosedDay {
    pub fn validated(mut self) -> Result<Self> {
        self.reason = required("reason", &self.reason)?;
        Ok(self)
    }
}
