use crate::adapters::outbound::formatters::events_to_csv;
use crate::application::dto::ExportFormat;
use crate::planning::domain::Event;
use crate::ports::outbound::EventRepository;
use crate::shared::Result;

/// Rendered export, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct EventExport {
    pub file_name: &'static str,
    pub content: String,
    pub count: usize,
}

/// ExportEventsUseCase - Dumps every event as JSON or CSV
pub struct ExportEventsUseCase<E: EventRepository> {
    events: E,
}

impl<E: EventRepository> ExportEventsUseCase<E> {
    pub fn new(events: E) -> Self {
        Self { events }
    }

    pub async fn execute(&self, format: ExportFormat) -> Result<EventExport> {
        let events = self.events.list().await?;
        let content = render(&events, format)?;
        tracing::info!(count = events.len(), ?format, "events exported");
        Ok(EventExport {
            file_name: format.default_file_name(),
            content,
            count: events.len(),
        })
    }
}

fn render(events: &[Event], format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(events)?),
        ExportFormat::Csv => Ok(events_to_csv(events)),
    }
}
