use crate::planning::domain::Event;
use crate::planning::services::EventFilter;
use tokio::sync::watch;

/// FilterState holds the active event filter
///
/// Subscribers are only notified when the filter actually changes.
pub struct FilterState {
    filter: watch::Sender<EventFilter>,
}

impl FilterState {
    pub fn new() -> Self {
        Self {
            filter: watch::Sender::new(EventFilter::default()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<EventFilter> {
        self.filter.subscribe()
    }

    pub fn current(&self) -> EventFilter {
        self.filter.borrow().clone()
    }

    /// Replaces the filter; returns whether anything changed
    pub fn set(&self, next: EventFilter) -> bool {
        self.filter.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        })
    }

    pub fn set_search_text(&self, text: &str) -> bool {
        self.update(|filter| filter.search_text = text.to_string())
    }

    pub fn toggle_category(&self, category: &str) -> bool {
        self.update(|filter| filter.toggle_category(category))
    }

    pub fn reset(&self) -> bool {
        self.set(EventFilter::default())
    }

    pub fn filtered(&self, events: &[Event]) -> Vec<Event> {
        self.filter.borrow().apply(events)
    }

    fn update(&self, change: impl FnOnce(&mut EventFilter)) -> bool {
        let mut next = self.current();
        change(&mut next);
        self.set(next)
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new()
    }
}
