use crate::planning::domain::{Absence, Period};
use crate::planning::services::calendar::HolidayCalendar;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SegmentShape {
    /// Whole working days
    Full,
    /// Morning only
    Am,
    /// Afternoon only
    Pm,
}

/// A contiguous stretch of an absence drawn as one bar on the planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub shape: SegmentShape,
}

/// Splits an absence into half-day edges and runs of working days.
///
/// An afternoon start yields a `Pm` segment on the first day and a morning end
/// an `Am` segment on the last day. The days in between are grouped into
/// `Full` runs; weekends, holidays and closed days break a run. Segments are
/// ordered by start date.
pub fn absence_segments(absence: &Absence, calendar: &HolidayCalendar) -> Vec<Segment> {
    if absence.start_date > absence.end_date {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut start = Some(absence.start_date);
    let mut end = Some(absence.end_date);

    if absence.start_period == Period::Afternoon {
        segments.push(Segment {
            start: absence.start_date,
            end: absence.start_date,
            shape: SegmentShape::Pm,
        });
        start = absence.start_date.succ_opt();
    }

    if let (Some(s), Some(e)) = (start, end) {
        if s <= e && absence.end_period == Period::Morning {
            segments.push(Segment {
                start: e,
                end: e,
                shape: SegmentShape::Am,
            });
            end = e.pred_opt();
        }
    }

    if let (Some(s), Some(e)) = (start, end) {
        let mut run: Option<(NaiveDate, NaiveDate)> = None;
        for day in s.iter_days().take_while(|d| *d <= e) {
            if calendar.is_off_day(day) {
                if let Some((run_start, run_end)) = run.take() {
                    segments.push(full(run_start, run_end));
                }
            } else {
                run = Some(match run {
                    Some((run_start, _)) => (run_start, day),
                    None => (day, day),
                });
            }
        }
        if let Some((run_start, run_end)) = run {
            segments.push(full(run_start, run_end));
        }
    }

    segments.sort_by_key(|s| s.start);
    segments
}

fn full(start: NaiveDate, end: NaiveDate) -> Segment {
    Segment {
        start,
        end,
        shape: SegmentShape::Full,
    }
}

/// Working days covered by the absence; half days count 0.5.
///
/// A half day falling on an off day counts for nothing.
pub fn working_days(absence: &Absence, calendar: &HolidayCalendar) -> f64 {
    absence_segments(absence, calendar)
        .iter()
        .map(|segment| match segment.shape {
            SegmentShape::Full => {
                segment
                    .start
                    .iter_days()
                    .take_while(|d| *d <= segment.end)
                    .count() as f64
            }
            SegmentShape::Am | SegmentShape::Pm if calendar.is_off_day(segment.start) => 0.0,
            SegmentShape::Am | SegmentShape::Pm => 0.5,
        })
        .sum()
}
