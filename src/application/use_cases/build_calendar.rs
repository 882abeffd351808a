use crate::planning::domain::{ClosedDay, Event};
use crate::planning::services::{Holiday, HolidayCalendar, Locale, SemesterGrid, YearGrid};
use crate::ports::outbound::{ClosedDayRepository, EventRepository};
use crate::shared::Result;
use chrono::NaiveDate;

/// BuildCalendarUseCase - Lays out events on the wall planner
///
/// Events and admin-declared closed days are fetched together, then placed
/// on a semester or a year grid.
///
/// # Type Parameters
/// * `E` - EventRepository implementation
/// * `C` - ClosedDayRepository implementation
pub struct BuildCalendarUseCase<E: EventRepository, C: ClosedDayRepository> {
    events: E,
    closed_days: C,
}

impl<E: EventRepository, C: ClosedDayRepository> BuildCalendarUseCase<E, C> {
    pub fn new(events: E, closed_days: C) -> Self {
        Self {
            events,
            closed_days,
        }
    }

    /// Semester containing `reference`, with the calendar used to mark off days
    pub async fn semester(
        &self,
        reference: NaiveDate,
        today: NaiveDate,
        locale: Locale,
    ) -> Result<(SemesterGrid, HolidayCalendar)> {
        let (events, calendar) = self.load().await?;
        let grid = SemesterGrid::build(reference, today, &events, &calendar, locale);
        tracing::debug!(label = %grid.label, events = events.len(), "semester grid built");
        Ok((grid, calendar))
    }

    pub async fn year(&self, year: i32, locale: Locale) -> Result<YearGrid> {
        let (events, calendar) = self.load().await?;
        Ok(YearGrid::build(year, &events, &calendar, locale))
    }

    /// Public holidays of `year` merged with the closed days
    pub async fn holidays(&self, year: i32) -> Result<Vec<Holiday>> {
        let closed_days = self.closed_days.list().await?;
        Ok(HolidayCalendar::with_closed_days(&closed_days).holidays(year))
    }

    async fn load(&self) -> Result<(Vec<Event>, HolidayCalendar)> {
        let (events, closed_days): (Vec<Event>, Vec<ClosedDay>) =
            futures::try_join!(self.events.list(), self.closed_days.list())?;
        Ok((events, HolidayCalendar::with_closed_days(&closed_days)))
    }
}
