use crate::planning::domain::Event;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Criteria narrowing the event list. The default filter keeps everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventFilter {
    #[serde(default)]
    pub search_text: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
}

impl EventFilter {
    pub fn matches(&self, event: &Event) -> bool {
        let needle = self.search_text.trim().to_lowercase();
        if !needle.is_empty() {
            let in_title = event.title.to_lowercase().contains(&needle);
            let in_description = event
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !in_title && !in_description {
                return false;
            }
        }

        if !self.categories.is_empty() && !self.categories.contains(&event.category) {
            return false;
        }

        if !self.tags.is_empty() && !event.tags.iter().any(|t| self.tags.contains(t)) {
            return false;
        }

        // Bounds apply to the start date only
        if self.date_from.is_some_and(|from| event.date < from) {
            return false;
        }
        if self.date_to.is_some_and(|to| event.date > to) {
            return false;
        }

        true
    }

    pub fn apply(&self, events: &[Event]) -> Vec<Event> {
        events.iter().filter(|e| self.matches(e)).cloned().collect()
    }

    /// Adds the category when absent, removes it otherwise.
    pub fn toggle_category(&mut self, category: &str) {
        match self.categories.iter().position(|c| c == category) {
            Some(index) => {
                self.categories.remove(index);
            }
            None => self.categories.push(category.to_string()),
        }
    }

    pub fn has_active_filters(&self) -> bool {
        !self.categories.is_empty()
            || !self.tags.is_empty()
            || !self.search_text.trim().is_empty()
            || self.date_from.is_some()
            || self.date_to.is_some()
    }
}

pub fn events_for_day(events: &[Event], day: NaiveDate) -> Vec<Event> {
    events.iter().filter(|e| e.occurs_on(day)).cloned().collect()
}

/// Orders events by date, then start time (untimed first), then title.
pub fn sort_by_date(events: &mut [Event]) {
    events.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.start_time.cmp(&b.start_time))
            .then_with(|| a.title.cmp(&b.title))
    });
}
