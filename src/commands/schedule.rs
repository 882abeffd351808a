use super::Context;
use crate::cli::AbsencesCommand;
use event_planner::prelude::*;
use std::sync::Arc;

pub async fn absences(ctx: &Context, command: AbsencesCommand) -> Result<()> {
    let AbsencesCommand::List { from, to } = command;
    ctx.require(PermissionModule::Absence, PermissionLevel::Read)
        .await?;

    let store = AbsenceStore::new(HttpAbsenceRepository::new(Arc::clone(&ctx.api)));
    let absences = store.load(DateRange::new(from, to)).await?;
    let calendar = closed_day_calendar(ctx).await;
    ctx.print(Report::Absences {
        absences: &absences,
        calendar: &calendar,
    })
}

pub async fn sprints(ctx: &Context) -> Result<()> {
    ctx.auth().require_session()?;
    let store = SprintStore::new(HttpSprintRepository::new(Arc::clone(&ctx.api)));
    let sprints = store.load().await?;
    ctx.print(Report::Sprints(&sprints))
}

pub async fn closed_days(ctx: &Context) -> Result<()> {
    ctx.auth().require_session()?;
    let store = ClosedDayStore::new(HttpClosedDayRepository::new(Arc::clone(&ctx.api)));
    let days = store.load().await?;
    ctx.print(Report::ClosedDays(&days))
}

/// Public holidays only when the closed days cannot be read
async fn closed_day_calendar(ctx: &Context) -> HolidayCalendar {
    let store = ClosedDayStore::new(HttpClosedDayRepository::new(Arc::clone(&ctx.api)));
    match store.load().await {
        Ok(_) => store.calendar(),
        Err(error) => {
            tracing::warn!(%error, "closed days unavailable, counting public holidays only");
            HolidayCalendar::new()
        }
    }
}
