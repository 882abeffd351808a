//! RFC 4180 CSV encoding of events

use crate::planning::domain::Event;

/// Column order of the events CSV export
pub const EVENT_CSV_COLUMNS: [&str; 10] = [
    "id",
    "title",
    "date",
    "endDate",
    "startTime",
    "endTime",
    "category",
    "color",
    "icon",
    "description",
];

/// Quotes a field when it holds a comma, a quote or a line break
pub fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Header line followed by one line per event, CRLF separated
pub fn events_to_csv(events: &[Event]) -> String {
    let mut lines = Vec::with_capacity(events.len() + 1);
    lines.push(EVENT_CSV_COLUMNS.join(","));

    for event in events {
        let date = event.date.to_string();
        let end_date = event.end_date.map(|d| d.to_string()).unwrap_or_default();
        let fields: [&str; 10] = [
            &event.id,
            &event.title,
            &date,
            &end_date,
            event.start_time.as_deref().unwrap_or(""),
            event.end_time.as_deref().unwrap_or(""),
            &event.category,
            &event.color,
            &event.icon,
            event.description.as_deref().unwrap_or(""),
        ];
        lines.push(
            fields
                .iter()
                .map(|f| escape_field(f))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    let mut csv = lines.join("\r\n");
    csv.push_str("\r\n");
    csv
}
