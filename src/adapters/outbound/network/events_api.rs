use super::api_client::HttpApiClient;
use crate::planning::domain::{Event, EventDraft};
use crate::ports::outbound::EventRepository;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;
use std::sync::Arc;

/// EventRepository over `/events`
pub struct HttpEventRepository {
    api: Arc<HttpApiClient>,
}

impl HttpEventRepository {
    pub fn new(api: Arc<HttpApiClient>) -> Self {
        Self { api }
    }

    fn item(id: &str) -> Result<String> {
        Ok(format!("/events/{}", HttpApiClient::segment(id, "Event id")?))
    }
}

#[async_trait]
impl EventRepository for HttpEventRepository {
    async fn list(&self) -> Result<Vec<Event>> {
        self.api.get("/events").await
    }

    async fn get(&self, id: &str) -> Result<Event> {
        self.api.get(&Self::item(id)?).await
    }

    async fn create(&self, draft: &EventDraft) -> Result<Event> {
        self.api.post("/events", draft).await
    }

    async fn update(&self, id: &str, draft: &EventDraft) -> Result<Event> {
        self.api.put(&Self::item(id)?, draft).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.api.delete(&Self::item(id)?).await
    }

    async fn bulk_import(&self, drafts: &[EventDraft]) -> Result<()> {
        self.api
            .execute(Method::POST, "/events/bulk", Some(&json!({ "events": drafts })))
            .await
    }

    async fn clear_all(&self) -> Result<()> {
        self.api.delete("/events").await
    }
}
