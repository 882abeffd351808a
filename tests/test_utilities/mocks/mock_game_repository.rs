use std::sync::{Arc, Mutex};
use event_planner::prelude::*;

/// GameRepository serving a single game; seeding can be made to fail
#[derive(Clone, Default)]
pub struct MockGameRepository {
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_init: bool,
}

impl MockGameRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failing_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

fn typing_game() -> Game {
    Game {
        id: "g1".to_string(),
        slug: "typing-fr".to_string(),
        name: "Dactylo".to_string(),
        description: None,
        icon: "keyboard".to_string(),
        is_active: true,
    }
}

#[async_trait::async_trait]
impl GameRepository for MockGameRepository {
    async fn init(&self) -> Result<Vec<Game>> {
        self.record("init");
        if self.fail_init {
            return Err(ApiError::from_status(500, None).into());
        }
        Ok(vec![typing_game()])
    }

    async fn list(&self) -> Result<Vec<Game>> {
        self.record("list");
        Ok(vec![typing_game()])
    }

    async fn get(&self, slug: &str) -> Result<Game> {
        self.record(format!("get {}", slug));
        Ok(typing_game())
    }

    async fn leaderboard(&self, slug: &str) -> Result<Vec<LeaderboardEntry>> {
        self.record(format!("leaderboard {}", slug));
        Ok(Vec::new())
    }

    async fn submit_score(
        &self,
        slug: &str,
        _submission: &ScoreSubmission,
    ) -> Result<SubmitScoreResponse> {
        self.record(format!("submit_score {}", slug));
        Err(ApiError::from_status(500, None).into())
    }

    async fn my_scores(&self, slug: &str) -> Result<MyScores> {
        self.record(format!("my_scores {}", slug));
        Err(ApiError::from_status(500, None).into())
    }
}
