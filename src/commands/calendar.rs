use super::Context;
use crate::cli::CalendarCommand;
use chrono::Datelike;
use event_planner::prelude::*;
use std::sync::Arc;

pub async fn run(ctx: &Context, command: CalendarCommand) -> Result<()> {
    let locale = ctx.config.locale;
    match command {
        CalendarCommand::Semester { date } => {
            ctx.auth().require_session()?;
            let reference = date.unwrap_or(ctx.today);
            let (grid, _) = use_case(ctx)
                .semester(reference, ctx.today, locale)
                .await?;
            ctx.print(Report::Semester(&grid))
        }
        CalendarCommand::Year { year } => {
            ctx.auth().require_session()?;
            let grid = use_case(ctx)
                .year(year.unwrap_or_else(|| ctx.today.year()), locale)
                .await?;
            ctx.print(Report::Year(&grid))
        }
        CalendarCommand::Holidays { year, closed_days } => {
            let year = year.unwrap_or_else(|| ctx.today.year());
            let holidays = if closed_days {
                ctx.auth().require_session()?;
                use_case(ctx).holidays(year).await?
            } else {
                HolidayCalendar::new().holidays(year)
            };
            ctx.print(Report::Holidays {
                year,
                holidays: &holidays,
            })
        }
    }
}

fn use_case(ctx: &Context) -> BuildCalendarUseCase<HttpEventRepository, HttpClosedDayRepository> {
    BuildCalendarUseCase::new(
        HttpEventRepository::new(Arc::clone(&ctx.api)),
        HttpClosedDayRepository::new(Arc::clone(&ctx.api)),
    )
}
