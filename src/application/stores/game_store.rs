use super::logged;
use crate::planning::domain::{
    Game, LeaderboardEntry, MyScores, ScoreSubmission, SubmitScoreResponse,
};
use crate::ports::outbound::GameRepository;
use crate::shared::Result;
use tokio::sync::watch;

/// GameStore holds the playground's game catalog
pub struct GameStore<R: GameRepository> {
    repository: R,
    games: watch::Sender<Vec<Game>>,
    loading: watch::Sender<bool>,
}

impl<R: GameRepository> GameStore<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            games: watch::Sender::new(Vec::new()),
            loading: watch::Sender::new(false),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Game>> {
        self.games.subscribe()
    }

    pub fn snapshot(&self) -> Vec<Game> {
        self.games.borrow().clone()
    }

    pub fn loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Seeds the catalog on the server, then loads it
    ///
    /// A failed seeding is only logged: the catalog may already exist.
    pub async fn initialize(&self) -> Result<Vec<Game>> {
        if let Err(error) = self.repository.init().await {
            tracing::warn!(%error, "game catalog initialization failed, loading existing games");
        }
        self.load().await
    }

    pub async fn load(&self) -> Result<Vec<Game>> {
        self.loading.send_replace(true);
        let result = logged("load games", self.repository.list().await);
        self.loading.send_replace(false);

        let games = result?;
        self.games.send_replace(games.clone());
        Ok(games)
    }

    pub async fn get(&self, slug: &str) -> Result<Game> {
        logged("get game", self.repository.get(slug).await)
    }

    pub async fn leaderboard(&self, slug: &str) -> Result<Vec<LeaderboardEntry>> {
        logged("load leaderboard", self.repository.leaderboard(slug).await)
    }

    pub async fn submit_score(
        &self,
        slug: &str,
        submission: ScoreSubmission,
    ) -> Result<SubmitScoreResponse> {
        logged(
            "submit score",
            self.repository.submit_score(slug, &submission).await,
        )
    }

    pub async fn my_scores(&self, slug: &str) -> Result<MyScores> {
        logged("load my scores", self.repository.my_scores(slug).await)
    }
}
