//! Report read model
//!
//! Everything the CLI prints goes through a `Report`, so the JSON and
//! Markdown formatters see the same set of views.

use super::dashboard::DashboardSummary;
use crate::planning::domain::{
    Absence, AdminStats, AdminUser, AuditEntry, ClosedDay, Event, Game, LeaderboardEntry,
    Microservice, MyScores, Release, ReleaseNoteEntry, Sprint, User, UserPermissions,
    UserPreferences,
};
use crate::planning::services::{Holiday, HolidayCalendar, SemesterGrid, YearGrid};
use serde::Serialize;

/// A borrowed view over data to render
///
/// JSON output serializes the borrowed data untagged, so a list report is a
/// plain JSON array like the API's own responses.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum Report<'a> {
    Events(&'a [Event]),
    Event(&'a Event),
    Releases(&'a [Release]),
    Release(&'a Release),
    /// Release handed over to production: Tontons MEP and actions by type
    ReleaseExport(&'a Release),
    ReleaseNotes(&'a [ReleaseNoteEntry]),
    Microservices(&'a [Microservice]),
    Absences {
        absences: &'a [Absence],
        /// Used to count working days, not serialized
        #[serde(skip)]
        calendar: &'a HolidayCalendar,
    },
    Sprints(&'a [Sprint]),
    ClosedDays(&'a [ClosedDay]),
    History(&'a [AuditEntry]),
    Games(&'a [Game]),
    Leaderboard {
        slug: &'a str,
        entries: &'a [LeaderboardEntry],
    },
    MyScores(&'a MyScores),
    Semester(&'a SemesterGrid),
    Year(&'a YearGrid),
    Holidays {
        year: i32,
        holidays: &'a [Holiday],
    },
    Settings(&'a UserPreferences),
    User(&'a User),
    #[serde(rename_all = "camelCase")]
    Permissions {
        user_id: &'a str,
        permissions: &'a UserPermissions,
    },
    AdminUsers(&'a [AdminUser]),
    AdminStats(&'a AdminStats),
    Dashboard(&'a DashboardSummary),
}

impl Report<'_> {
    /// Heading used by text formats
    pub fn title(&self) -> String {
        match self {
            Report::Events(_) => "Événements".to_string(),
            Report::Event(event) => event.title.clone(),
            Report::Releases(_) => "Releases".to_string(),
            Report::Release(release) => format!("{} ({})", release.name, release.version),
            Report::ReleaseExport(release) => release.name.clone(),
            Report::ReleaseNotes(_) => "Release note".to_string(),
            Report::Microservices(_) => "Microservices".to_string(),
            Report::Absences { .. } => "Absences".to_string(),
            Report::Sprints(_) => "Sprints".to_string(),
            Report::ClosedDays(_) => "Jours fermés".to_string(),
            Report::History(_) => "Historique".to_string(),
            Report::Games(_) => "Jeux".to_string(),
            Report::Leaderboard { slug, .. } => format!("Classement - {}", slug),
            Report::MyScores(_) => "Mes scores".to_string(),
            Report::Semester(grid) => grid.label.clone(),
            Report::Year(grid) => grid.year.to_string(),
            Report::Holidays { year, .. } => format!("Jours fériés {}", year),
            Report::Settings(_) => "Paramètres".to_string(),
            Report::User(user) => user.display_name(),
            Report::Permissions { user_id, .. } => format!("Permissions - {}", user_id),
            Report::AdminUsers(_) => "Utilisateurs".to_string(),
            Report::AdminStats(_) => "Statistiques".to_string(),
            Report::Dashboard(_) => "Tableau de bord".to_string(),
        }
    }
}
