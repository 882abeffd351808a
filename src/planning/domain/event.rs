use crate::shared::error::ApiError;
use crate::shared::Result;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Suffix appended to the title of a duplicated event
pub const DUPLICATE_SUFFIX: &str = " (copie)";

/// A calendar event as stored by the planning API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub color: String,
    pub icon: String,
    /// Default category id or a `custom_<millis>` id
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprint_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Event {
    /// True when the event covers `day`, either as its start date or inside
    /// its `date..=end_date` range.
    pub fn occurs_on(&self, day: NaiveDate) -> bool {
        match self.end_date {
            Some(end) => self.date <= day && day <= end,
            None => self.date == day,
        }
    }

    pub fn is_multi_day(&self) -> bool {
        matches!(self.end_date, Some(end) if end > self.date)
    }

    /// Payload that recreates this event under a fresh id.
    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            title: self.title.clone(),
            date: self.date,
            end_date: self.end_date,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            color: self.color.clone(),
            icon: self.icon.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            tags: self.tags.clone(),
            sprint_id: self.sprint_id.clone(),
        }
    }

    /// Draft for a copy of this event, optionally moved to `new_date`.
    ///
    /// A multi-day copy keeps its length when it is moved.
    pub fn duplicate_draft(&self, new_date: Option<NaiveDate>) -> EventDraft {
        let mut draft = self.to_draft();
        draft.title = format!("{}{}", self.title, DUPLICATE_SUFFIX);
        if let Some(date) = new_date {
            draft.reschedule(date);
        }
        draft
    }
}

/// Create/update payload for an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub color: String,
    pub icon: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprint_id: Option<String>,
}

impl EventDraft {
    /// Minimal draft using the default colour and icon of `category`.
    pub fn new(title: impl Into<String>, date: NaiveDate, category: EventCategory) -> Self {
        Self {
            title: title.into(),
            date,
            end_date: None,
            start_time: None,
            end_time: None,
            color: category.color().to_string(),
            icon: category.icon().to_string(),
            category: category.id().to_string(),
            description: None,
            tags: Vec::new(),
            sprint_id: None,
        }
    }

    /// Moves the draft to `date`, shifting `end_date` by the same offset.
    pub fn reschedule(&mut self, date: NaiveDate) {
        let offset = date - self.date;
        self.end_date = self.end_date.map(|end| end + offset);
        self.date = date;
    }

    /// Checks the draft and returns it with a trimmed title.
    ///
    /// # Errors
    /// Returns `ApiError::Validation` when:
    /// - the title is blank
    /// - `end_date` is before `date`
    /// - a time is not `HH:mm`
    /// - a single-day event ends before it starts
    pub fn validated(mut self) -> Result<Self> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ApiError::validation("title", "Title is required").into());
        }
        self.title = title.to_string();

        if let Some(end) = self.end_date {
            if end < self.date {
                return Err(ApiError::validation(
                    "endDate",
                    "End date must not be before the start date",
                )
                .into());
            }
        }

        let start = self
            .start_time
            .as_deref()
            .map(|t| parse_time("startTime", t))
            .transpose()?;
        let end = self
            .end_time
            .as_deref()
            .map(|t| parse_time("endTime", t))
            .transpose()?;

        let single_day = self.end_date.map_or(true, |end| end == self.date);
        if let (Some(start), Some(end), true) = (start, end, single_day) {
            if end < start {
                return Err(ApiError::validation(
                    "endTime",
                    "End time must not be before the start time",
                )
                .into());
            }
        }

        Ok(self)
    }
}

/// Parses an `HH:mm` time of day.
pub fn parse_time(field: &str, value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| {
        ApiError::validation(field, format!("'{}' is not a valid HH:mm time", value)).into()
    })
}

/// Built-in event categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Mep,
    Hotfix,
    Maintenance,
    PiPlanning,
    SprintStart,
    CodeFreeze,
    Psi,
    Other,
}

impl EventCategory {
    pub const ALL: [EventCategory; 8] = [
        EventCategory::Mep,
        EventCategory::Hotfix,
        EventCategory::Maintenance,
        EventCategory::PiPlanning,
        EventCategory::SprintStart,
        EventCategory::CodeFreeze,
        EventCategory::Psi,
        EventCategory::Other,
    ];

    pub fn id(self) -> &'static str {
        match self {
            EventCategory::Mep => "mep",
            EventCategory::Hotfix => "hotfix",
            EventCategory::Maintenance => "maintenance",
            EventCategory::PiPlanning => "pi_planning",
            EventCategory::SprintStart => "sprint_start",
            EventCategory::CodeFreeze => "code_freeze",
            EventCategory::Psi => "psi",
            EventCategory::Other => "other",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    pub fn label(self) -> &'static str {
        match self {
            EventCategory::Mep => "Mise en production",
            EventCategory::Hotfix => "Hotfix",
            EventCategory::Maintenance => "Maintenance",
            EventCategory::PiPlanning => "PI Planning",
            EventCategory::SprintStart => "Début de sprint",
            EventCategory::CodeFreeze => "Freeze du code",
            EventCategory::Psi => "PSI",
            EventCategory::Other => "Autre",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            EventCategory::Mep => "#22c55e",
            EventCategory::Hotfix => "#ef4444",
            EventCategory::Maintenance => "#6b7280",
            EventCategory::PiPlanning => "#eab308",
            EventCategory::SprintStart => "#06b6d4",
            EventCategory::CodeFreeze => "#f97316",
            EventCategory::Psi => "#1f2937",
            EventCategory::Other => "#8b5cf6",
        }
    }

    /// Lighter variant used with the dark theme
    pub fn dark_color(self) -> &'static str {
        match self {
            EventCategory::Mep => "#4ade80",
            EventCategory::Hotfix => "#f87171",
            EventCategory::Maintenance => "#9ca3af",
            EventCategory::PiPlanning => "#fde047",
            EventCategory::SprintStart => "#22d3ee",
            EventCategory::CodeFreeze => "#fb923c",
            EventCategory::Psi => "#4b5563",
            EventCategory::Other => "#a78bfa",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            EventCategory::Mep => "rocket_launch",
            EventCategory::Hotfix => "bug_report",
            EventCategory::Maintenance => "build",
            EventCategory::PiPlanning => "groups",
            EventCategory::SprintStart => "flag",
            EventCategory::CodeFreeze => "ac_unit",
            EventCategory::Psi => "block",
            EventCategory::Other => "event",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
pub(crate) fn sample_event(id: &str, title: &str, date: &str) -> Event {
    Event {
        id: id.to_string(),
        title: title.to_string(),
        date: date.parse().unwrap(),
        end_date: None,
        start_time: None,
        end_time: None,
        color: "#22c55e".to_string(),
        icon: "rocket_launch".to_string(),
        category: "mep".to_string(),
        description: None,
        tags: Vec::new(),
        sprint_id: None,
        created_at: None,
        updated_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_occurs_on_single_day() {
        let event = sample_event("1", "MEP", "2025-03-10");
        assert!(event.occurs_on(date("2025-03-10")));
        assert!(!event.occurs_on(date("2025-03-11")));
    }

    #[test]
    fn test_occurs_on_range_is_inclusive() {
        let mut event = sample_event("1", "Freeze", "2025-03-10");
        event.end_date = Some(date("2025-03-12"));
        assert!(event.occurs_on(date("2025-03-10")));
        assert!(event.occurs_on(date("2025-03-11")));
        assert!(event.occurs_on(date("2025-03-12")));
        assert!(!event.occurs_on(date("2025-03-13")));
        assert!(!event.occurs_on(date("2025-03-09")));
    }

    #[test]
    fn test_validated_trims_title() {
        let draft = EventDraft::new("  MEP v2  ", date("2025-01-01"), EventCategory::Mep);
        let draft = draft.validated().unwrap();
        assert_eq!(draft.title, "MEP v2");
    }

    #[test]
    fn test_validated_rejects_blank_title() {
        let draft = EventDraft::new("   ", date("2025-01-01"), EventCategory::Mep);
        let err = draft.validated().unwrap_err();
        let api = err.downcast_ref::<ApiError>().unwrap();
        assert!(matches!(api, ApiError::Validation { field, .. } if field == "title"));
    }

    #[test]
    fn test_validated_rejects_end_before_start() {
        let mut draft = EventDraft::new("Freeze", date("2025-01-10"), EventCategory::CodeFreeze);
        draft.end_date = Some(date("2025-01-09"));
        assert!(draft.validated().is_err());
    }

    #[test]
    fn test_validated_times() {
        let mut draft = EventDraft::new("Deploy", date("2025-01-10"), EventCategory::Mep);
        draft.start_time = Some("14:00".to_string());
        draft.end_time = Some("09:30".to_string());
        assert!(draft.clone().validated().is_err());

        // Spanning several days, the end time may be earlier
        draft.end_date = Some(date("2025-01-11"));
        assert!(draft.clone().validated().is_ok());

        draft.start_time = Some("25:00".to_string());
        assert!(draft.validated().is_err());
    }

    #[test]
    fn test_duplicate_draft_suffix_and_move() {
        let mut event = sample_event("1", "PI Planning", "2025-01-10");
        event.end_date = Some(date("2025-01-12"));

        let copy = event.duplicate_draft(None);
        assert_eq!(copy.title, "PI Planning (copie)");
        assert_eq!(copy.date, event.date);

        let moved = event.duplicate_draft(Some(date("2025-02-01")));
        assert_eq!(moved.date, date("2025-02-01"));
        assert_eq!(moved.end_date, Some(date("2025-02-03")));
    }

    #[test]
    fn test_category_defaults() {
        assert_eq!(EventCategory::from_id("pi_planning"), Some(EventCategory::PiPlanning));
        assert_eq!(EventCategory::from_id("custom_1"), None);
        assert_eq!(EventCategory::Hotfix.color(), "#ef4444");
        assert_eq!(EventCategory::Other.icon(), "event");
        assert_eq!(EventCategory::SprintStart.label(), "Début de sprint");
        assert_eq!(EventCategory::Psi.dark_color(), "#4b5563");
    }

    #[test]
    fn test_event_json_is_camel_case() {
        let mut event = sample_event("e1", "MEP", "2025-05-02");
        event.start_time = Some("08:00".to_string());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["startTime"], "08:00");
        assert_eq!(json["date"], "2025-05-02");
        assert!(json.get("endDate").is_none());
    }
}
