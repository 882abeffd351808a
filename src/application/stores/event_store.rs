use super::logged;
use crate::planning::domain::{Event, EventDraft};
use crate::ports::outbound::EventRepository;
use crate::shared::error::ApiError;
use crate::shared::Result;
use chrono::NaiveDate;
use tokio::sync::watch;

/// EventStore holds the calendar events
///
/// Drafts are validated before any request is sent. Every successful
/// mutation is followed by a full reload of the list.
pub struct EventStore<R: EventRepository> {
    repository: R,
    events: watch::Sender<Vec<Event>>,
    loading: watch::Sender<bool>,
}

impl<R: EventRepository> EventStore<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            events: watch::Sender::new(Vec::new()),
            loading: watch::Sender::new(false),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Event>> {
        self.events.subscribe()
    }

    pub fn snapshot(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// `true` while a load or an import is running
    pub fn loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub async fn load(&self) -> Result<Vec<Event>> {
        self.loading.send_replace(true);
        let result = logged("load events", self.repository.list().await);
        self.loading.send_replace(false);

        let events = result?;
        self.events.send_replace(events.clone());
        Ok(events)
    }

    async fn reload(&self) -> Result<()> {
        let events = logged("reload events", self.repository.list().await)?;
        self.events.send_replace(events);
        Ok(())
    }

    pub async fn create(&self, draft: EventDraft) -> Result<Event> {
        let draft = draft.validated()?;
        let created = logged("create event", self.repository.create(&draft).await)?;
        self.reload().await?;
        Ok(created)
    }

    pub async fn update(&self, id: &str, draft: EventDraft) -> Result<Event> {
        let draft = draft.validated()?;
        let updated = logged("update event", self.repository.update(id, &draft).await)?;
        self.reload().await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        logged("delete event", self.repository.delete(id).await)?;
        self.reload().await
    }

    /// Copies an event, optionally onto another date; the title gets a " (copie)" suffix
    pub async fn duplicate(&self, id: &str, new_date: Option<NaiveDate>) -> Result<Event> {
        let source = self.find(id).await?;
        self.create(source.duplicate_draft(new_date)).await
    }

    /// Moves an event to `date`, keeping the length of multi-day events
    pub async fn move_to(&self, id: &str, date: NaiveDate) -> Result<Event> {
        let mut draft = self.find(id).await?.to_draft();
        draft.reschedule(date);
        self.update(id, draft).await
    }

    /// Creates many events in a single request
    ///
    /// Every draft is validated first; one invalid draft rejects the batch.
    pub async fn import(&self, drafts: Vec<EventDraft>) -> Result<usize> {
        let drafts = drafts
            .into_iter()
            .enumerate()
            .map(|(index, draft)| {
                draft.validated().map_err(|e| match e.downcast::<ApiError>() {
                    Ok(ApiError::Validation { field, message }) => ApiError::validation(
                        format!("events[{}].{}", index, field),
                        message,
                    )
                    .into(),
                    Ok(other) => other.into(),
                    Err(other) => other,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        if drafts.is_empty() {
            return Ok(0);
        }

        self.loading.send_replace(true);
        let result = logged("import events", self.repository.bulk_import(&drafts).await);
        self.loading.send_replace(false);
        result?;

        self.reload().await?;
        Ok(drafts.len())
    }

    pub async fn clear_all(&self) -> Result<()> {
        logged("clear events", self.repository.clear_all().await)?;
        self.reload().await
    }

    /// Current events, for writing an export file
    pub fn export(&self) -> Vec<Event> {
        self.snapshot()
    }

    async fn find(&self, id: &str) -> Result<Event> {
        let cached = self.events.borrow().iter().find(|e| e.id == id).cloned();
        match cached {
            Some(event) => Ok(event),
            None => logged("get event", self.repository.get(id).await),
        }
    }
}
