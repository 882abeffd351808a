use super::logged;
use crate::planning::domain::{Absence, AbsenceRequest, AbsenceUser, ClosedDay, Sprint};
use crate::planning::services::HolidayCalendar;
use crate::ports::outbound::{AbsenceRepository, ClosedDayRepository, DateRange, SprintRepository};
use crate::shared::Result;
use chrono::NaiveDate;
use tokio::sync::watch;

/// AbsenceStore holds the absences of the displayed date window
pub struct AbsenceStore<R: AbsenceRepository> {
    repository: R,
    range: watch::Sender<DateRange>,
    absences: watch::Sender<Vec<Absence>>,
    users: watch::Sender<Vec<AbsenceUser>>,
}

impl<R: AbsenceRepository> AbsenceStore<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            range: watch::Sender::new(DateRange::default()),
            absences: watch::Sender::new(Vec::new()),
            users: watch::Sender::new(Vec::new()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Absence>> {
        self.absences.subscribe()
    }

    pub fn snapshot(&self) -> Vec<Absence> {
        self.absences.borrow().clone()
    }

    pub fn users(&self) -> Vec<AbsenceUser> {
        self.users.borrow().clone()
    }

    pub fn range(&self) -> DateRange {
        *self.range.borrow()
    }

    /// Loads the absences overlapping `range`; later reloads reuse it
    pub async fn load(&self, range: DateRange) -> Result<Vec<Absence>> {
        self.range.send_replace(range);
        self.reload().await
    }

    async fn reload(&self) -> Result<Vec<Absence>> {
        let absences = logged("load absences", self.repository.list(self.range()).await)?;
        self.absences.send_replace(absences.clone());
        Ok(absences)
    }

    pub async fn load_users(&self) -> Result<Vec<AbsenceUser>> {
        let users = logged("load absence users", self.repository.users().await)?;
        self.users.send_replace(users.clone());
        Ok(users)
    }

    pub async fn create(&self, request: AbsenceRequest) -> Result<Absence> {
        let request = request.validated()?;
        let created = logged("create absence", self.repository.create(&request).await)?;
        self.reload().await?;
        Ok(created)
    }

    pub async fn update(&self, id: &str, request: AbsenceRequest) -> Result<Absence> {
        let request = request.validated()?;
        let updated = logged("update absence", self.repository.update(id, &request).await)?;
        self.reload().await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        logged("delete absence", self.repository.delete(id).await)?;
        self.reload().await.map(|_| ())
    }
}

/// SprintStore holds the sprint calendar
pub struct SprintStore<R: SprintRepository> {
    repository: R,
    sprints: watch::Sender<Vec<Sprint>>,
}

impl<R: SprintRepository> SprintStore<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            sprints: watch::Sender::new(Vec::new()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Sprint>> {
        self.sprints.subscribe()
    }

    pub fn snapshot(&self) -> Vec<Sprint> {
        self.sprints.borrow().clone()
    }

    /// Sprint running on `day`, if any
    pub fn sprint_on(&self, day: NaiveDate) -> Option<Sprint> {
        self.sprints.borrow().iter().find(|s| s.contains(day)).cloned()
    }

    pub async fn load(&self) -> Result<Vec<Sprint>> {
        let mut sprints = logged("load sprints", self.repository.list().await)?;
        sprints.sort_by_key(|s| s.start_date);
        self.sprints.send_replace(sprints.clone());
        Ok(sprints)
    }

    pub async fn create(&self, sprint: Sprint) -> Result<Sprint> {
        let sprint = sprint.validated()?;
        let created = logged("create sprint", self.repository.create(&sprint).await)?;
        self.load().await?;
        Ok(created)
    }

    pub async fn update(&self, id: &str, sprint: Sprint) -> Result<Sprint> {
        let sprint = sprint.validated()?;
        let updated = logged("update sprint", self.repository.update(id, &sprint).await)?;
        self.load().await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        logged("delete sprint", self.repository.delete(id).await)?;
        self.load().await.map(|_| ())
    }
}

/// ClosedDayStore holds the days declared closed by administrators
pub struct ClosedDayStore<R: ClosedDayRepository> {
    repository: R,
    days: watch::Sender<Vec<ClosedDay>>,
}

impl<R: ClosedDayRepository> ClosedDayStore<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            days: watch::Sender::new(Vec::new()),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<ClosedDay>> {
        self.days.subscribe()
    }

    pub fn snapshot(&self) -> Vec<ClosedDay> {
        self.days.borrow().clone()
    }

    /// Public holidays plus the loaded closed days
    pub fn calendar(&self) -> HolidayCalendar {
        HolidayCalendar::with_closed_days(&self.days.borrow())
    }

    pub async fn load(&self) -> Result<Vec<ClosedDay>> {
        let mut days = logged("load closed days", self.repository.list().await)?;
        days.sort_by_key(|d| d.date);
        self.days.send_replace(days.clone());
        Ok(days)
    }

    pub async fn create(&self, day: ClosedDay) -> Result<ClosedDay> {
        let day = day.validated()?;
        let created = logged("create closed day", self.repository.create(&day).await)?;
        self.load().await?;
        Ok(created)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        logged("delete closed day", self.repository.delete(id).await)?;
        self.load().await.map(|_| ())
    }
}
