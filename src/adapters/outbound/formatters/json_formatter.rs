use crate::application::read_models::Report;
use crate::ports::outbound::OutputFormatter;
use crate::shared::Result;

/// JsonFormatter renders reports as pretty-printed JSON
#[derive(Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &Report<'_>) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}
