use super::api_client::HttpApiClient;
use crate::planning::domain::{
    Game, LeaderboardEntry, MyScores, ScoreSubmission, SubmitScoreResponse,
};
use crate::ports::outbound::{GameRepository, OnboardingRepository};
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;
use std::sync::Arc;

/// GameRepository over `/games`
pub struct HttpGameRepository {
    api: Arc<HttpApiClient>,
}

impl HttpGameRepository {
    pub fn new(api: Arc<HttpApiClient>) -> Self {
        Self { api }
    }

    fn game_path(slug: &str, suffix: &str) -> Result<String> {
        Ok(format!(
            "/games/{}{}",
            HttpApiClient::segment(slug, "Game slug")?,
            suffix
        ))
    }
}

#[async_trait]
impl GameRepository for HttpGameRepository {
    async fn init(&self) -> Result<Vec<Game>> {
        self.api.post("/games/init", &json!({})).await
    }

    async fn list(&self) -> Result<Vec<Game>> {
        self.api.get("/games").await
    }

    async fn get(&self, slug: &str) -> Result<Game> {
        self.api.get(&Self::game_path(slug, "")?).await
    }

    async fn leaderboard(&self, slug: &str) -> Result<Vec<LeaderboardEntry>> {
        self.api.get(&Self::game_path(slug, "/leaderboard")?).await
    }

    async fn submit_score(
        &self,
        slug: &str,
        submission: &ScoreSubmission,
    ) -> Result<SubmitScoreResponse> {
        self.api
            .post(&Self::game_path(slug, "/scores")?, submission)
            .await
    }

    async fn my_scores(&self, slug: &str) -> Result<MyScores> {
        self.api.get(&Self::game_path(slug, "/my-scores")?).await
    }
}

/// OnboardingRepository over `/onboarding`
pub struct HttpOnboardingRepository {
    api: Arc<HttpApiClient>,
}

impl HttpOnboardingRepository {
    pub fn new(api: Arc<HttpApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl OnboardingRepository for HttpOnboardingRepository {
    async fn seen_keys(&self) -> Result<Vec<String>> {
        self.api.get("/onboarding/status").await
    }

    async fn mark_seen(&self, key: &str) -> Result<()> {
        let path = format!(
            "/onboarding/seen/{}",
            HttpApiClient::segment(key, "Onboarding key")?
        );
        self.api
            .execute(Method::POST, &path, Some(&json!({})))
            .await
    }

    async fn skip_all(&self) -> Result<()> {
        self.api
            .execute(Method::POST, "/onboarding/skip-all", Some(&json!({})))
            .await
    }
}
