use crate::application::read_models::DashboardSummary;
use crate::planning::domain::HistoryKind;
use crate::ports::outbound::{
    EventRepository, HistoryRepository, ReleaseRepository, SettingsRepository,
};
use crate::shared::Result;
use chrono::NaiveDate;

/// DashboardUseCase - Loads the home screen in one round
///
/// The four resources are requested concurrently; the first failure aborts
/// the whole load.
pub struct DashboardUseCase<E, R, S, H> {
    events: E,
    releases: R,
    settings: S,
    history: H,
}

impl<E, R, S, H> DashboardUseCase<E, R, S, H>
where
    E: EventRepository,
    R: ReleaseRepository,
    S: SettingsRepository,
    H: HistoryRepository,
{
    pub fn new(events: E, releases: R, settings: S, history: H) -> Self {
        Self {
            events,
            releases,
            settings,
            history,
        }
    }

    pub async fn execute(&self, today: NaiveDate) -> Result<DashboardSummary> {
        let (events, releases, preferences, history) = futures::try_join!(
            self.events.list(),
            self.releases.list(),
            self.settings.get(),
            self.history.list(HistoryKind::Events),
        )?;
        Ok(DashboardSummary::build(
            today,
            preferences.theme,
            &events,
            &releases,
            history.len(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::test_support::{
        FixedEvents, FixedHistory, FixedReleases, FixedSettings,
    };
    use crate::planning::domain::event::sample_event;
    use crate::planning::domain::{Theme, UserPreferences};
    use crate::shared::error::ApiError;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()
    }

    fn dark() -> UserPreferences {
        UserPreferences {
            theme: Theme::Dark,
            ..UserPreferences::defaults()
        }
    }

    #[tokio::test]
    async fn test_dashboard_combines_all_resources() {
        let use_case = DashboardUseCase::new(
            FixedEvents(vec![
                sample_event("1", "Passé", "2025-01-10"),
                sample_event("2", "À venir", "2025-02-10"),
            ]),
            FixedReleases(Vec::new()),
            FixedSettings(dark()),
            FixedHistory {
                entries: 3,
                fail_with: None,
            },
        );

        let summary = use_case.execute(today()).await.unwrap();
        assert_eq!(summary.theme, Theme::Dark);
        assert_eq!(summary.event_count, 2);
        assert_eq!(summary.history_count, 3);
        assert_eq!(summary.upcoming_events.len(), 1);
        assert_eq!(summary.upcoming_events[0].id, "2");
    }

    #[tokio::test]
    async fn test_dashboard_fails_when_one_resource_fails() {
        let use_case = DashboardUseCase::new(
            FixedEvents(Vec::new()),
            FixedReleases(Vec::new()),
            FixedSettings(dark()),
            FixedHistory {
                entries: 0,
                fail_with: Some(403),
            },
        );

        let err = use_case.execute(today()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ApiError>(),
            Some(ApiError::PermissionDenied { .. })
        ));
    }
}
