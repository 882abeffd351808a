use crate::planning::domain::{
    Game, LeaderboardEntry, MyScores, ScoreSubmission, SubmitScoreResponse,
};
use crate::ports::outbound::GameRepository;
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// CachingGameRepository keeps the game catalog in memory.
///
/// Game definitions only change when the catalog is re-initialized, so they
/// are served from the cache once seen. Leaderboards and personal scores are
/// always fetched from the inner repository.
pub struct CachingGameRepository<R: GameRepository> {
    inner: R,
    cache: Arc<DashMap<String, Game>>,
}

impl<R: GameRepository> CachingGameRepository<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    fn remember(&self, games: &[Game]) {
        for game in games {
            self.cache.insert(game.slug.clone(), game.clone());
        }
    }

    #[cfg(test)]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<R: GameRepository> GameRepository for CachingGameRepository<R> {
    async fn init(&self) -> Result<Vec<Game>> {
        let games = self.inner.init().await?;
        self.cache.clear();
        self.remember(&games);
        Ok(games)
    }

    async fn list(&self) -> Result<Vec<Game>> {
        let games = self.inner.list().await?;
        self.remember(&games);
        Ok(games)
    }

    async fn get(&self, slug: &str) -> Result<Game> {
        if let Some(cached) = self.cache.get(slug) {
            tracing::trace!(slug, "game served from cache");
            return Ok(cached.clone());
        }

        let game = self.inner.get(slug).await?;
        self.cache.insert(slug.to_string(), game.clone());
        Ok(game)
    }

    async fn leaderboard(&self, slug: &str) -> Result<Vec<LeaderboardEntry>> {
        self.inner.leaderboard(slug).await
    }

    async fn submit_score(
        &self,
        slug: &str,
        submission: &ScoreSubmission,
    ) -> Result<SubmitScoreResponse> {
        self.inner.submit_score(slug, submission).await
    }

    async fn my_scores(&self, slug: &str) -> Result<MyScores> {
        self.inner.my_scores(slug).await
    }
}
