use std::sync::Arc;

use prep_core::model::{SessionUser, StatCard, StatKey, Stats, StatsPatch};
use storage::repository::StatsRepository;
use tracing::debug;

use crate::error::StatsServiceError;

/// Reads and mutates the per-user dashboard counters.
#[derive(Clone)]
pub struct StatsService {
    repo: Arc<dyn StatsRepository>,
}

/// Everything the home page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub greeting_name: String,
    pub cards: Vec<StatCard>,
}

impl StatsService {
    #[must_use]
    pub fn new(repo: Arc<dyn StatsRepository>) -> Self {
        Self { repo }
    }

    /// Stored stats, or zeros for a user who has none yet.
    ///
    /// # Errors
    ///
    /// Returns `StatsServiceError::Storage` on read failures.
    pub async fn load(&self, user: &SessionUser) -> Result<Stats, StatsServiceError> {
        Ok(self.repo.get_stats(&user.email).await?.unwrap_or_default())
    }

    /// Merge `patch` into the stored stats and persist.
    ///
    /// # Errors
    ///
    /// Returns `StatsServiceError::Storage` on read or write failures.
    pub async fn update(
        &self,
        user: &SessionUser,
        patch: StatsPatch,
    ) -> Result<Stats, StatsServiceError> {
        let mut stats = self.load(user).await?;
        stats.apply(patch);
        self.repo.save_stats(&user.email, &stats).await?;
        Ok(stats)
    }

    /// Add `amount` to one counter and persist.
    ///
    /// # Errors
    ///
    /// Returns `StatsServiceError::Storage` on read or write failures.
    pub async fn increment(
        &self,
        user: &SessionUser,
        key: StatKey,
        amount: u32,
    ) -> Result<Stats, StatsServiceError> {
        let mut stats = self.load(user).await?;
        stats.increment(key, amount);
        debug!(email = %user.email, ?key, amount, "stat incremented");
        self.repo.save_stats(&user.email, &stats).await?;
        Ok(stats)
    }

    /// Home page view. Signed-out visitors see zeroed cards.
    ///
    /// # Errors
    ///
    /// Returns `StatsServiceError::Storage` on read failures.
    pub async fn dashboard(
        &self,
        user: Option<&SessionUser>,
    ) -> Result<Dashboard, StatsServiceError> {
        let (greeting_name, stats) = match user {
            Some(user) => (user.name.clone(), self.load(user).await?),
            None => ("Student".to_owned(), Stats::default()),
        };
        Ok(Dashboard {
            greeting_name,
            cards: stats.cards().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::Storage;

    fn user(email: &str) -> SessionUser {
        SessionUser {
            email: email.to_owned(),
            name: "Tester".to_owned(),
        }
    }

    #[tokio::test]
    async fn new_user_reads_zeros() {
        let service = StatsService::new(Storage::in_memory().stats);
        assert_eq!(service.load(&user("a@b")).await.unwrap(), Stats::default());
    }

    #[tokio::test]
    async fn increments_persist_per_user() {
        let storage = Storage::in_memory();
        let service = StatsService::new(Arc::clone(&storage.stats));
        service
            .increment(&user("a@b"), StatKey::McqSets, 1)
            .await
            .unwrap();
        service
            .increment(&user("a@b"), StatKey::McqSets, 1)
            .await
            .unwrap();

        let reloaded = StatsService::new(storage.stats);
        assert_eq!(reloaded.load(&user("a@b")).await.unwrap().mcq_sets, 2);
        assert_eq!(reloaded.load(&user("c@d")).await.unwrap().mcq_sets, 0);
    }

    #[tokio::test]
    async fn dashboard_greets_signed_out_visitor() {
        let service = StatsService::new(Storage::in_memory().stats);
        let dashboard = service.dashboard(None).await.unwrap();
        assert_eq!(dashboard.greeting_name, "Student");
        assert_eq!(dashboard.cards.len(), 4);
        assert!(dashboard.cards.iter().all(|c| c.value == 0));
    }
}
