use crate::planning::domain::{Absence, AbsenceRequest, AbsenceUser};
use crate::shared::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Date window for listing absences; open bounds are omitted from the query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }
}

#[async_trait]
pub trait AbsenceRepository: Send + Sync {
    async fn list(&self, range: DateRange) -> Result<Vec<Absence>>;

    /// People who can be shown on the absence planning
    async fn users(&self) -> Result<Vec<AbsenceUser>>;

    async fn create(&self, request: &AbsenceRequest) -> Result<Absence>;

    async fn update(&self, id: &str, request: &AbsenceRequest) -> Result<Absence>;

    async fn delete(&self, id: &str) -> Result<()>;
}
