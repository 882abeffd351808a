use event_planner::prelude::*;
use std::sync::{Arc, Mutex};

/// MicroserviceRepository over an in-memory catalog; `delete` deactivates
#[derive(Clone, Default)]
pub struct MockMicroserviceRepository {
    pub microservices: Arc<Mutex<Vec<Microservice>>>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockMicroserviceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_microservice(self, id: &str, name: &str, squad: &str, order: i32) -> Self {
        self.microservices
            .lock()
            .unwrap()
            .push(microservice(id, name, squad, order));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn find(&self, id: &str) -> Result<Microservice> {
        self.microservices
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| {
                ApiError::NotFound {
                    message: format!("microservice {}", id),
                }
                .into()
            })
    }
}

pub fn microservice(id: &str, name: &str, squad: &str, order: i32) -> Microservice {
    Microservice {
        id: id.to_string(),
        name: name.to_string(),
        squad: squad.to_string(),
        solution: None,
        display_order: order,
        is_active: true,
        description: None,
        previous_tag: None,
        created_at: None,
        updated_at: None,
    }
}

#[async_trait::async_trait]
impl MicroserviceRepository for MockMicroserviceRepository {
    async fn list_active(&self, release_id: Option<&str>) -> Result<Vec<Microservice>> {
        match release_id {
            Some(release_id) => self.record(format!("list_active {}", release_id)),
            None => self.record("list_active"),
        }
        Ok(self
            .microservices
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.is_active)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<Microservice>> {
        self.record("list_all");
        Ok(self.microservices.lock().unwrap().clone())
    }

    async fn list_by_squad(&self, squad: &str) -> Result<Vec<Microservice>> {
        self.record(format!("list_by_squad {}", squad));
        Ok(self
            .microservices
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.squad == squad)
            .cloned()
            .collect())
    }

    async fn get(&self, id: &str) -> Result<Microservice> {
        self.record(format!("get {}", id));
        self.find(id)
    }

    async fn create(&self, dto: &CreateMicroservice) -> Result<Microservice> {
        self.record(format!("create {}", dto.name));
        let mut microservices = self.microservices.lock().unwrap();
        let mut created = microservice(
            &format!("ms-{}", microservices.len() + 1),
            &dto.name,
            &dto.squad,
            dto.display_order.unwrap_or_default(),
        );
        created.solution = dto.solution.clone();
        created.description = dto.description.clone();
        microservices.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, dto: &UpdateMicroservice) -> Result<Microservice> {
        self.record(format!("update {}", id));
        let mut updated = self.find(id)?;
        if let Some(name) = &dto.name {
            updated.name = name.clone();
        }
        if let Some(squad) = &dto.squad {
            updated.squad = squad.clone();
        }
        if let Some(order) = dto.display_order {
            updated.display_order = order;
        }
        if let Some(active) = dto.is_active {
            updated.is_active = active;
        }
        let mut microservices = self.microservices.lock().unwrap();
        if let Some(existing) = microservices.iter_mut().find(|m| m.id == id) {
            *existing = updated.clone();
        }
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.record(format!("delete {}", id));
        let mut microservices = self.microservices.lock().unwrap();
        if let Some(existing) = microservices.iter_mut().find(|m| m.id == id) {
            existing.is_active = false;
        }
        Ok(())
    }

    async fn hard_delete(&self, id: &str) -> Result<()> {
        self.record(format!("hard_delete {}", id));
        self.microservices.lock().unwrap().retain(|m| m.id != id);
        Ok(())
    }
}
