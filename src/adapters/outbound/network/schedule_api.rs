use super::api_client::HttpApiClient;
use crate::planning::domain::{Absence, AbsenceRequest, AbsenceUser, ClosedDay, Sprint};
use crate::ports::outbound::{AbsenceRepository, ClosedDayRepository, DateRange, SprintRepository};
use crate::shared::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// AbsenceRepository over `/absences`
pub struct HttpAbsenceRepository {
    api: Arc<HttpApiClient>,
}

impl HttpAbsenceRepository {
    pub fn new(api: Arc<HttpApiClient>) -> Self {
        Self { api }
    }

    fn list_path(range: DateRange) -> String {
        format!(
            "/absences{}",
            HttpApiClient::query(&[
                ("startDate", range.start.map(|d| d.to_string())),
                ("endDate", range.end.map(|d| d.to_string())),
            ])
        )
    }
}

#[async_trait]
impl AbsenceRepository for HttpAbsenceRepository {
    async fn list(&self, range: DateRange) -> Result<Vec<Absence>> {
        self.api.get(&Self::list_path(range)).await
    }

    async fn users(&self) -> Result<Vec<AbsenceUser>> {
        self.api.get("/absences/users").await
    }

    async fn create(&self, request: &AbsenceRequest) -> Result<Absence> {
        self.api.post("/absences", request).await
    }

    async fn update(&self, id: &str, request: &AbsenceRequest) -> Result<Absence> {
        let path = format!("/absences/{}", HttpApiClient::segment(id, "Absence id")?);
        self.api.put(&path, request).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let path = format!("/absences/{}", HttpApiClient::segment(id, "Absence id")?);
        self.api.delete(&path).await
    }
}

/// SprintRepository over `/sprints`
pub struct HttpSprintRepository {
    api: Arc<HttpApiClient>,
}

impl HttpSprintRepository {
    pub fn new(api: Arc<HttpApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl SprintRepository for HttpSprintRepository {
    async fn list(&self) -> Result<Vec<Sprint>> {
        self.api.get("/sprints").await
    }

    async fn create(&self, sprint: &Sprint) -> Result<Sprint> {
        self.api.post("/sprints", sprint).await
    }

    async fn update(&self, id: &str, sprint: &Sprint) -> Result<Sprint> {
        let path = format!("/sprints/{}", HttpApiClient::segment(id, "Sprint id")?);
        self.api.put(&path, sprint).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let path = format!("/sprints/{}", HttpApiClient::segment(id, "Sprint id")?);
        self.api.delete(&path).await
    }
}

/// ClosedDayRepository over `/closed-days`
pub struct HttpClosedDayRepository {
    api: Arc<HttpApiClient>,
}

impl HttpClosedDayRepository {
    pub fn new(api: Arc<HttpApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ClosedDayRepository for HttpClosedDayRepository {
    async fn list(&self) -> Result<Vec<ClosedDay>> {
        self.api.get("/closed-days").await
    }

    async fn create(&self, day: &ClosedDay) -> Result<ClosedDay> {
        self.api.post("/closed-days", day).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let path = format!("/closed-days/{}", HttpApiClient::segment(id, "Closed day id")?);
        self.api.delete(&path).await
    }
}
