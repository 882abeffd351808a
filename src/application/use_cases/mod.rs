/// Use cases module containing application business logic orchestration
mod build_calendar;
mod dashboard;
mod export_database;
mod export_events;
mod import_database;

#[cfg(test)]
mod test_support;

pub use build_calendar::BuildCalendarUseCase;
pub use dashboard::DashboardUseCase;
pub use export_database::{backup_file_name, ExportDatabaseUseCase};
pub use export_events::{EventExport, ExportEventsUseCase};
pub use import_database::{ImportDatabaseUseCase, ImportOutcome};
