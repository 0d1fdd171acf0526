use crate::error::{Error, Result};
use crate::types::{
    AccountSnapshot, BrandCollaboration, ContentCategory, ContentRecord, PerformanceMilestone,
    Platform, StoredPrediction,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Storage seam for the analyzer.
///
/// The production implementation lives behind the API server; this crate
/// ships [`MemoryRepository`] for the CLI demo path and tests.
#[async_trait]
pub trait Repository: Send + Sync {
    async fn social_accounts(&self, user_id: &str) -> Result<Vec<AccountSnapshot>>;

    async fn portfolio_content(
        &self,
        user_id: &str,
        platform: Option<&Platform>,
    ) -> Result<Vec<ContentRecord>>;

    async fn performance_milestones(&self, user_id: &str) -> Result<Vec<PerformanceMilestone>>;

    async fn content_categories(&self, user_id: &str) -> Result<Vec<ContentCategory>>;

    async fn brand_collaborations(&self, user_id: &str) -> Result<Vec<BrandCollaboration>>;

    async fn create_trend_prediction(&self, prediction: StoredPrediction) -> Result<()>;

    async fn trend_predictions(
        &self,
        user_id: &str,
        platform: Option<&Platform>,
    ) -> Result<Vec<StoredPrediction>>;
}

#[derive(Default)]
struct UserData {
    accounts: Vec<AccountSnapshot>,
    content: Vec<ContentRecord>,
    milestones: Vec<PerformanceMilestone>,
    categories: Vec<ContentCategory>,
    collaborations: Vec<BrandCollaboration>,
    predictions: Vec<StoredPrediction>,
}

/// In-memory repository, seedable per user.
#[derive(Default)]
pub struct MemoryRepository {
    users: Mutex<HashMap<String, UserData>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_accounts(&self, user_id: &str, accounts: Vec<AccountSnapshot>) {
        self.with_user(user_id, |u| u.accounts = accounts);
    }

    pub fn seed_content(&self, user_id: &str, content: Vec<ContentRecord>) {
        self.with_user(user_id, |u| u.content = content);
    }

    pub fn seed_milestones(&self, user_id: &str, milestones: Vec<PerformanceMilestone>) {
        self.with_user(user_id, |u| u.milestones = milestones);
    }

    pub fn seed_categories(&self, user_id: &str, categories: Vec<ContentCategory>) {
        self.with_user(user_id, |u| u.categories = categories);
    }

    pub fn seed_collaborations(&self, user_id: &str, collaborations: Vec<BrandCollaboration>) {
        self.with_user(user_id, |u| u.collaborations = collaborations);
    }

    fn with_user(&self, user_id: &str, f: impl FnOnce(&mut UserData)) {
        let mut users = self.users.lock().expect("repository lock poisoned");
        f(users.entry(user_id.to_string()).or_default());
    }

    fn read_user<T>(&self, user_id: &str, f: impl FnOnce(&UserData) -> T) -> T {
        let mut users = self.users.lock().expect("repository lock poisoned");
        f(users.entry(user_id.to_string()).or_default())
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn social_accounts(&self, user_id: &str) -> Result<Vec<AccountSnapshot>> {
        Ok(self.read_user(user_id, |u| u.accounts.clone()))
    }

    async fn portfolio_content(
        &self,
        user_id: &str,
        platform: Option<&Platform>,
    ) -> Result<Vec<ContentRecord>> {
        Ok(self.read_user(user_id, |u| {
            u.content
                .iter()
                .filter(|c| platform.is_none_or(|p| &c.platform == p))
                .cloned()
                .collect()
        }))
    }

    async fn performance_milestones(&self, user_id: &str) -> Result<Vec<PerformanceMilestone>> {
        Ok(self.read_user(user_id, |u| u.milestones.clone()))
    }

    async fn content_categories(&self, user_id: &str) -> Result<Vec<ContentCategory>> {
        Ok(self.read_user(user_id, |u| u.categories.clone()))
    }

    async fn brand_collaborations(&self, user_id: &str) -> Result<Vec<BrandCollaboration>> {
        Ok(self.read_user(user_id, |u| u.collaborations.clone()))
    }

    async fn create_trend_prediction(&self, prediction: StoredPrediction) -> Result<()> {
        if prediction.user_id.is_empty() {
            return Err(Error::storage("prediction is missing a user id"));
        }
        let user_id = prediction.user_id.clone();
        self.with_user(&user_id, |u| u.predictions.push(prediction));
        Ok(())
    }

    async fn trend_predictions(
        &self,
        user_id: &str,
        platform: Option<&Platform>,
    ) -> Result<Vec<StoredPrediction>> {
        Ok(self.read_user(user_id, |u| {
            u.predictions
                .iter()
                .filter(|p| platform.is_none_or(|f| &p.platform == f))
                .cloned()
                .collect()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Timeframe;
    use chrono::Utc;

    fn stored(user: &str, platform: Platform, trend: &str) -> StoredPrediction {
        StoredPrediction {
            id: trend.to_string(),
            user_id: user.to_string(),
            platform,
            trend: trend.to_string(),
            confidence: 0.8,
            timeframe: Timeframe::Weekly,
            predicted_growth: 10.0,
            content_suggestions: vec![],
            target_audience: String::new(),
            reasoning: String::new(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn predictions_filter_by_platform() {
        let repo = MemoryRepository::new();
        repo.create_trend_prediction(stored("u1", Platform::Instagram, "reels"))
            .await
            .unwrap();
        repo.create_trend_prediction(stored("u1", Platform::Youtube, "shorts"))
            .await
            .unwrap();

        let all = repo.trend_predictions("u1", None).await.unwrap();
        assert_eq!(all.len(), 2);

        let ig = repo
            .trend_predictions("u1", Some(&Platform::Instagram))
            .await
            .unwrap();
        assert_eq!(ig.len(), 1);
        assert_eq!(ig[0].trend, "reels");
    }

    #[tokio::test]
    async fn unknown_user_reads_empty() {
        let repo = MemoryRepository::new();
        assert!(repo.social_accounts("nobody").await.unwrap().is_empty());
        assert!(
            repo.portfolio_content("nobody", None)
                .await
                .unwrap()
                .is_empty()
        );
    }
}
