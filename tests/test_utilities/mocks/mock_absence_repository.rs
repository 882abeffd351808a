use std::sync::{Arc, Mutex};
use event_planner::prelude::*;

/// AbsenceRepository recording calls and the ranges it was listed with
#[derive(Clone, Default)]
pub struct MockAbsenceRepository {
    pub absences: Arc<Mutex<Vec<Absence>>>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub ranges: Arc<Mutex<Vec<DateRange>>>,
}

impl MockAbsenceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn ranges(&self) -> Vec<DateRange> {
        self.ranges.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

fn to_absence(id: &str, request: &AbsenceRequest) -> Absence {
    Absence {
        id: id.to_string(),
        user_id: request.user_id.clone().unwrap_or_else(|| "u1".to_string()),
        user_first_name: "Jane".to_string(),
        user_last_name: "Doe".to_string(),
        start_date: request.start_date,
        end_date: request.end_date,
        absence_type: request.absence_type,
        start_period: request.start_period,
        end_period: request.end_period,
    }
}

#[async_trait::async_trait]
impl AbsenceRepository for MockAbsenceRepository {
    async fn list(&self, range: DateRange) -> Result<Vec<Absence>> {
        self.record("list");
        self.ranges.lock().unwrap().push(range);
        Ok(self.absences.lock().unwrap().clone())
    }

    async fn users(&self) -> Result<Vec<AbsenceUser>> {
        self.record("users");
        Ok(Vec::new())
    }

    async fn create(&self, request: &AbsenceRequest) -> Result<Absence> {
        self.record("create");
        let mut absences = self.absences.lock().unwrap();
        let absence = to_absence(&format!("abs-{}", absences.len() + 1), request);
        absences.push(absence.clone());
        Ok(absence)
    }

    async fn update(&self, id: &str, request: &AbsenceRequest) -> Result<Absence> {
        self.record(format!("update {}", id));
        Ok(to_absence(id, request))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.record(format!("delete {}", id));
        self.absences.lock().unwrap().retain(|a| a.id != id);
        Ok(())
    }
}
