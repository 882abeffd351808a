use chrono::NaiveDate;
use std::sync::{Arc, Mutex};
use event_planner::prelude::*;

/// In-memory EventRepository that records every call it receives
#[derive(Clone, Default)]
pub struct MockEventRepository {
    pub events: Arc<Mutex<Vec<Event>>>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_writes: bool,
}

impl MockEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_event(self, id: &str, title: &str, date: &str) -> Self {
        let date: NaiveDate = date.parse().unwrap();
        let draft = EventDraft::new(title, date, EventCategory::Mep);
        self.events.lock().unwrap().push(to_event(id, &draft));
        self
    }

    /// Writes fail with a 500 after being recorded
    pub fn with_failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn check_write(&self) -> Result<()> {
        if self.fail_writes {
            return Err(ApiError::from_status(500, Some("boom".to_string())).into());
        }
        Ok(())
    }
}

fn to_event(id: &str, draft: &EventDraft) -> Event {
    Event {
        id: id.to_string(),
        title: draft.title.clone(),
        date: draft.date,
        end_date: draft.end_date,
        start_time: draft.start_time.clone(),
        end_time: draft.end_time.clone(),
        color: draft.color.clone(),
        icon: draft.icon.clone(),
        category: draft.category.clone(),
        description: draft.description.clone(),
        tags: draft.tags.clone(),
        sprint_id: draft.sprint_id.clone(),
        created_at: None,
        updated_at: None,
    }
}

#[async_trait::async_trait]
impl EventRepository for MockEventRepository {
    async fn list(&self) -> Result<Vec<Event>> {
        self.record("list");
        Ok(self.events.lock().unwrap().clone())
    }

    async fn get(&self, id: &str) -> Result<Event> {
        self.record(format!("get {}", id));
        self.events
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| ApiError::from_status(404, None).into())
    }

    async fn create(&self, draft: &EventDraft) -> Result<Event> {
        self.record(format!("create {}", draft.title));
        self.check_write()?;
        let mut events = self.events.lock().unwrap();
        let event = to_event(&format!("ev-{}", events.len() + 1), draft);
        events.push(event.clone());
        Ok(event)
    }

    async fn update(&self, id: &str, draft: &EventDraft) -> Result<Event> {
        self.record(format!("update {}", id));
        self.check_write()?;
        let mut events = self.events.lock().unwrap();
        let slot = events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| ApiError::from_status(404, None))?;
        *slot = to_event(id, draft);
        Ok(slot.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.record(format!("delete {}", id));
        self.check_write()?;
        self.events.lock().unwrap().retain(|e| e.id != id);
        Ok(())
    }

    async fn bulk_import(&self, drafts: &[EventDraft]) -> Result<()> {
        self.record(format!("bulk_import {}", drafts.len()));
        self.check_write()?;
        let mut events = self.events.lock().unwrap();
        for draft in drafts {
            let id = format!("ev-{}", events.len() + 1);
            events.push(to_event(&id, draft));
        }
        Ok(())
    }

    async fn clear_all(&self) -> Result<()> {
        self.record("clear_all");
        self.check_write()?;
        self.events.lock().unwrap().clear();
        Ok(())
    }
}
