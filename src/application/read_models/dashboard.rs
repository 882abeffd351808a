//! Dashboard read model

use crate::planning::domain::{Event, Release, Theme};
use chrono::NaiveDate;
use serde::Serialize;

/// Number of upcoming items listed on the dashboard
pub const UPCOMING_LIMIT: usize = 5;

/// Home screen overview, built from several resources loaded together
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub today: NaiveDate,
    pub theme: Theme,
    pub event_count: usize,
    pub release_count: usize,
    pub history_count: usize,
    pub upcoming_events: Vec<Event>,
    pub upcoming_releases: Vec<Release>,
}

impl DashboardSummary {
    pub fn build(
        today: NaiveDate,
        theme: Theme,
        events: &[Event],
        releases: &[Release],
        history_count: usize,
    ) -> Self {
        let mut upcoming_events: Vec<Event> = events
            .iter()
            .filter(|e| e.end_date.unwrap_or(e.date) >= today)
            .cloned()
            .collect();
        crate::planning::services::sort_by_date(&mut upcoming_events);
        upcoming_events.truncate(UPCOMING_LIMIT);

        let mut upcoming_releases: Vec<Release> = releases
            .iter()
            .filter(|r| r.release_date >= today)
            .cloned()
            .collect();
        upcoming_releases.sort_by_key(|r| r.release_date);
        upcoming_releases.truncate(UPCOMING_LIMIT);

        Self {
            today,
            theme,
            event_count: events.len(),
            release_count: releases.len(),
            history_count,
            upcoming_events,
            upcoming_releases,
        }
    }
}
