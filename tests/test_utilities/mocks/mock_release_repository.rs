use std::sync::{Arc, Mutex};
use event_planner::prelude::*;

/// In-memory ReleaseRepository that records every call it receives
#[derive(Clone, Default)]
pub struct MockReleaseRepository {
    pub releases: Arc<Mutex<Vec<Release>>>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockReleaseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a release with squad `s1` holding the pending action `a1`
    pub fn with_release(self, id: &str, name: &str) -> Self {
        self.releases.lock().unwrap().push(release(id, name));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn with_squad<T>(&self, squad_id: &str, f: impl FnOnce(&mut Squad) -> T) -> Result<T> {
        let mut releases = self.releases.lock().unwrap();
        let squad = releases
            .iter_mut()
            .flat_map(|r| r.squads.iter_mut())
            .find(|s| s.id == squad_id)
            .ok_or_else(|| ApiError::from_status(404, None))?;
        Ok(f(squad))
    }

    fn with_action<T>(&self, action_id: &str, f: impl FnOnce(&mut Action) -> T) -> Result<T> {
        let mut releases = self.releases.lock().unwrap();
        let action = releases
            .iter_mut()
            .flat_map(|r| r.squads.iter_mut())
            .flat_map(|s| s.actions.iter_mut())
            .find(|a| a.id == action_id)
            .ok_or_else(|| ApiError::from_status(404, None))?;
        Ok(f(action))
    }
}

pub fn release(id: &str, name: &str) -> Release {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": name,
        "version": "25.1.0",
        "releaseDate": "2025-02-14",
        "status": "in_progress",
        "squads": [{
            "id": "s1",
            "releaseId": id,
            "squadNumber": 1,
            "actions": [{
                "id": "a1",
                "squadId": "s1",
                "phase": "pre_mep",
                "type": "other",
                "description": "Purger le cache",
                "status": "pending"
            }]
        }]
    }))
    .unwrap()
}

#[async_trait::async_trait]
impl ReleaseRepository for MockReleaseRepository {
    async fn list(&self) -> Result<Vec<Release>> {
        self.record("list");
        Ok(self.releases.lock().unwrap().clone())
    }

    async fn get(&self, id: &str) -> Result<Release> {
        self.record(format!("get {}", id));
        self.releases
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| ApiError::from_status(404, None).into())
    }

    async fn create(&self, dto: &CreateRelease) -> Result<Release> {
        self.record(format!("create {}", dto.name));
        let mut releases = self.releases.lock().unwrap();
        let mut created = release(&format!("rel-{}", releases.len() + 1), &dto.name);
        created.squads.clear();
        releases.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, dto: &UpdateRelease) -> Result<Release> {
        self.record(format!("update {}", id));
        let mut releases = self.releases.lock().unwrap();
        let slot = releases
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ApiError::from_status(404, None))?;
        if let Some(name) = &dto.name {
            slot.name = name.clone();
        }
        if let Some(status) = dto.status {
            slot.status = status;
        }
        Ok(slot.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.record(format!("delete {}", id));
        self.releases.lock().unwrap().retain(|r| r.id != id);
        Ok(())
    }

    async fn update_squad(&self, squad_id: &str, dto: &UpdateSquad) -> Result<()> {
        self.record(format!("update_squad {}", squad_id));
        self.with_squad(squad_id, |squad| {
            if let Some(done) = dto.is_completed {
                squad.is_completed = done;
            }
        })
    }

    async fn add_feature(&self, squad_id: &str, dto: &CreateFeature) -> Result<Feature> {
        self.record(format!("add_feature {}", squad_id));
        self.with_squad(squad_id, |squad| {
            let feature = Feature {
                id: format!("f-{}", squad.features.len() + 1),
                squad_id: squad_id.to_string(),
                title: dto.title.clone(),
                description: dto.description.clone(),
            };
            squad.features.push(feature.clone());
            feature
        })
    }

    async fn update_feature(&self, feature_id: &str, dto: &CreateFeature) -> Result<Feature> {
        self.record(format!("update_feature {}", feature_id));
        Ok(Feature {
            id: feature_id.to_string(),
            squad_id: "s1".to_string(),
            title: dto.title.clone(),
            description: dto.description.clone(),
        })
    }

    async fn delete_feature(&self, feature_id: &str) -> Result<()> {
        self.record(format!("delete_feature {}", feature_id));
        Ok(())
    }

    async fn add_action(&self, squad_id: &str, dto: &CreateAction) -> Result<Action> {
        self.record(format!("add_action {}", squad_id));
        self.with_squad(squad_id, |squad| {
            let action = Action {
                id: format!("a-{}", squad.actions.len() + 1),
                squad_id: squad_id.to_string(),
                phase: dto.phase,
                action_type: dto.action_type,
                title: dto.title.clone(),
                description: dto.description.clone(),
                status: ActionStatus::Pending,
                order: dto.order.unwrap_or_default(),
                flipping: dto.flipping.clone(),
            };
            squad.actions.push(action.clone());
            action
        })
    }

    async fn update_action(&self, action_id: &str, dto: &UpdateAction) -> Result<Action> {
        self.record(format!("update_action {} {:?}", action_id, dto.status));
        self.with_action(action_id, |action| {
            if let Some(status) = dto.status {
                action.status = status;
            }
            action.clone()
        })
    }

    async fn delete_action(&self, action_id: &str) -> Result<()> {
        self.record(format!("delete_action {}", action_id));
        Ok(())
    }
}
