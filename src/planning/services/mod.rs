pub mod absence_segments;
pub mod calendar;
pub mod category_catalog;
pub mod event_filter;
pub mod flipping_display;

pub use absence_segments::{absence_segments, working_days, Segment, SegmentShape};
pub use calendar::{
    easter_sunday, is_public_holiday, is_weekend, public_holidays, Holiday, HolidayCalendar,
    HolidayKind, Locale, SemesterGrid, TimelineState, TimelineView, YearGrid,
};
pub use category_catalog::{CategoryCatalog, CategoryEntry, TagCatalog};
pub use event_filter::{events_for_day, sort_by_date, EventFilter};
