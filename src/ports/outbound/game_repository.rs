use crate::planning::domain::{
    Game, LeaderboardEntry, MyScores, ScoreSubmission, SubmitScoreResponse,
};
use crate::shared::Result;
use async_trait::async_trait;

/// GameRepository port for the playground mini-games
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Asks the server to create the default games if missing
    async fn init(&self) -> Result<Vec<Game>>;

    async fn list(&self) -> Result<Vec<Game>>;

    async fn get(&self, slug: &str) -> Result<Game>;

    async fn leaderboard(&self, slug: &str) -> Result<Vec<LeaderboardEntry>>;

    async fn submit_score(
        &self,
        slug: &str,
        submission: &ScoreSubmission,
    ) -> Result<SubmitScoreResponse>;

    async fn my_scores(&self, slug: &str) -> Result<MyScores>;
}
