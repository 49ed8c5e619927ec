use async_trait::async_trait;
use prep_core::model::{
    Account, LeaderboardEntry, Note, Resource, Routine, SessionUser, Stats, email_taken,
};
use prep_core::syllabus::CompletedTopics;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::keys;
use crate::kv::{InMemoryStore, KeyValueStore};

/// Errors surfaced by storage adapters.
///
/// Absent keys are not errors: reads return `None` or an empty list.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

//
// ─── REPOSITORY TRAITS ─────────────────────────────────────────────────────────
//

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// All registered accounts, in registration order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend or decoding failures.
    async fn list_accounts(&self) -> Result<Vec<Account>, StorageError>;

    /// Append a new account.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the email is already registered;
    /// the stored list is left untouched in that case.
    async fn insert_account(&self, account: &Account) -> Result<(), StorageError>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` on backend or decoding failures.
    async fn load_session(&self) -> Result<Option<SessionUser>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the session cannot be written.
    async fn save_session(&self, user: &SessionUser) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be reached.
    async fn clear_session(&self) -> Result<(), StorageError>;
}

#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// `Ok(None)` when the user has no stats yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend or decoding failures.
    async fn get_stats(&self, email: &str) -> Result<Option<Stats>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the stats cannot be written.
    async fn save_stats(&self, email: &str, stats: &Stats) -> Result<(), StorageError>;
}

#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` on backend or decoding failures.
    async fn list_notes(&self, email: &str) -> Result<Vec<Note>, StorageError>;

    /// Replace the user's whole note list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the list cannot be written.
    async fn save_notes(&self, email: &str, notes: &[Note]) -> Result<(), StorageError>;
}

#[async_trait]
pub trait ResourceRepository: Send + Sync {
    /// `Ok(None)` until the user saves a list; callers seed defaults.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend or decoding failures.
    async fn get_resources(&self, email: &str) -> Result<Option<Vec<Resource>>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the list cannot be written.
    async fn save_resources(&self, email: &str, resources: &[Resource])
    -> Result<(), StorageError>;
}

#[async_trait]
pub trait RoutineRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` on backend or decoding failures.
    async fn get_routine(&self, email: &str) -> Result<Option<Routine>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the routine cannot be written.
    async fn save_routine(&self, email: &str, routine: &Routine) -> Result<(), StorageError>;
}

#[async_trait]
pub trait SyllabusRepository: Send + Sync {
    /// Empty set when nothing was ticked yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend or decoding failures.
    async fn get_completed(&self, email: &str) -> Result<CompletedTopics, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the set cannot be written.
    async fn save_completed(
        &self,
        email: &str,
        completed: &CompletedTopics,
    ) -> Result<(), StorageError>;
}

#[async_trait]
pub trait LeaderboardRepository: Send + Sync {
    /// Newest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend or decoding failures.
    async fn list_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the list cannot be written.
    async fn save_leaderboard(&self, entries: &[LeaderboardEntry]) -> Result<(), StorageError>;
}

//
// ─── KEY-VALUE BACKED IMPLEMENTATION ───────────────────────────────────────────
//

/// Implements every repository trait as JSON blobs over a `KeyValueStore`.
#[derive(Clone)]
pub struct KvRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KvRepository {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.store.get(key).await? else {
            debug!(key, "storage miss");
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::Serialization(format!("{key}: {e}")))
    }

    async fn write_json<T: Serialize + ?Sized + Sync>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), StorageError> {
        let raw =
            serde_json::to_string(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
        debug!(key, bytes = raw.len(), "storage write");
        self.store.set(key, &raw).await
    }
}

#[async_trait]
impl AccountRepository for KvRepository {
    async fn list_accounts(&self) -> Result<Vec<Account>, StorageError> {
        Ok(self.read_json(keys::ACCOUNTS).await?.unwrap_or_default())
    }

    async fn insert_account(&self, account: &Account) -> Result<(), StorageError> {
        let mut accounts = self.list_accounts().await?;
        if email_taken(&accounts, &account.email) {
            return Err(StorageError::Conflict);
        }
        accounts.push(account.clone());
        self.write_json(keys::ACCOUNTS, &accounts).await
    }
}

#[async_trait]
impl SessionRepository for KvRepository {
    async fn load_session(&self) -> Result<Option<SessionUser>, StorageError> {
        self.read_json(keys::SESSION_USER).await
    }

    async fn save_session(&self, user: &SessionUser) -> Result<(), StorageError> {
        self.write_json(keys::SESSION_USER, user).await
    }

    async fn clear_session(&self) -> Result<(), StorageError> {
        self.store.remove(keys::SESSION_USER).await
    }
}

#[async_trait]
impl StatsRepository for KvRepository {
    async fn get_stats(&self, email: &str) -> Result<Option<Stats>, StorageError> {
        self.read_json(&keys::stats(email)).await
    }

    async fn save_stats(&self, email: &str, stats: &Stats) -> Result<(), StorageError> {
        self.write_json(&keys::stats(email), stats).await
    }
}

#[async_trait]
impl NoteRepository for KvRepository {
    async fn list_notes(&self, email: &str) -> Result<Vec<Note>, StorageError> {
        Ok(self.read_json(&keys::notes(email)).await?.unwrap_or_default())
    }

    async fn save_notes(&self, email: &str, notes: &[Note]) -> Result<(), StorageError> {
        self.write_json(&keys::notes(email), notes).await
    }
}

#[async_trait]
impl ResourceRepository for KvRepository {
    async fn get_resources(&self, email: &str) -> Result<Option<Vec<Resource>>, StorageError> {
        self.read_json(&keys::resources(email)).await
    }

    async fn save_resources(
        &self,
        email: &str,
        resources: &[Resource],
    ) -> Result<(), StorageError> {
        self.write_json(&keys::resources(email), resources).await
    }
}

#[async_trait]
impl RoutineRepository for KvRepository {
    async fn get_routine(&self, email: &str) -> Result<Option<Routine>, StorageError> {
        self.read_json(&keys::routine(email)).await
    }

    async fn save_routine(&self, email: &str, routine: &Routine) -> Result<(), StorageError> {
        self.write_json(&keys::routine(email), routine).await
    }
}

#[async_trait]
impl SyllabusRepository for KvRepository {
    async fn get_completed(&self, email: &str) -> Result<CompletedTopics, StorageError> {
        Ok(self
            .read_json(&keys::syllabus(email))
            .await?
            .unwrap_or_default())
    }

    async fn save_completed(
        &self,
        email: &str,
        completed: &CompletedTopics,
    ) -> Result<(), StorageError> {
        self.write_json(&keys::syllabus(email), completed).await
    }
}

#[async_trait]
impl LeaderboardRepository for KvRepository {
    async fn list_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, StorageError> {
        Ok(self.read_json(keys::LEADERBOARD).await?.unwrap_or_default())
    }

    async fn save_leaderboard(&self, entries: &[LeaderboardEntry]) -> Result<(), StorageError> {
        self.write_json(keys::LEADERBOARD, entries).await
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub accounts: Arc<dyn AccountRepository>,
    pub session: Arc<dyn SessionRepository>,
    pub stats: Arc<dyn StatsRepository>,
    pub notes: Arc<dyn NoteRepository>,
    pub resources: Arc<dyn ResourceRepository>,
    pub routines: Arc<dyn RoutineRepository>,
    pub syllabus: Arc<dyn SyllabusRepository>,
    pub leaderboard: Arc<dyn LeaderboardRepository>,
}

impl Storage {
    /// Wire every repository to the same key-value store.
    #[must_use]
    pub fn from_store(store: Arc<dyn KeyValueStore>) -> Self {
        let repo = KvRepository::new(store);
        Self {
            accounts: Arc::new(repo.clone()),
            session: Arc::new(repo.clone()),
            stats: Arc::new(repo.clone()),
            notes: Arc::new(repo.clone()),
            resources: Arc::new(repo.clone()),
            routines: Arc::new(repo.clone()),
            syllabus: Arc::new(repo.clone()),
            leaderboard: Arc::new(repo),
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(InMemoryStore::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::model::{NoteDraft, NoteKind};
    use prep_core::time::fixed_now;

    fn repo_with_store() -> (KvRepository, InMemoryStore) {
        let store = InMemoryStore::new();
        (KvRepository::new(Arc::new(store.clone())), store)
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict_and_keeps_original() {
        let (repo, _) = repo_with_store();
        let first = Account::register("a@b.np", "secret1", "First").unwrap();
        repo.insert_account(&first).await.unwrap();

        let second = Account::register("a@b.np", "other12", "Second").unwrap();
        let err = repo.insert_account(&second).await.unwrap_err();
        assert!(matches!(err, StorageError::Conflict));

        let stored = repo.list_accounts().await.unwrap();
        assert_eq!(stored, vec![first]);
    }

    #[tokio::test]
    async fn notes_are_scoped_per_email() {
        let (repo, store) = repo_with_store();
        let note = NoteDraft::new("OS", "Kernel", NoteKind::Short)
            .into_note(fixed_now())
            .unwrap();
        repo.save_notes("a@b.np", &[note]).await.unwrap();

        assert_eq!(repo.list_notes("a@b.np").await.unwrap().len(), 1);
        assert!(repo.list_notes("c@d.np").await.unwrap().is_empty());
        assert!(store.get("loksewa_notes_a@b.np").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn malformed_blob_is_a_serialization_error() {
        let (repo, store) = repo_with_store();
        store.set("loksewa_stats_a@b.np", "{not json").await.unwrap();
        let err = repo.get_stats("a@b.np").await.unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[tokio::test]
    async fn clear_session_removes_key() {
        let (repo, _) = repo_with_store();
        let user = SessionUser {
            email: "a@b.np".into(),
            name: "A".into(),
        };
        repo.save_session(&user).await.unwrap();
        assert_eq!(repo.load_session().await.unwrap(), Some(user));
        repo.clear_session().await.unwrap();
        assert_eq!(repo.load_session().await.unwrap(), None);
    }

    #[tokio::test]
    async fn missing_keys_read_as_empty() {
        let storage = Storage::in_memory();
        assert!(storage.accounts.list_accounts().await.unwrap().is_empty());
        assert!(storage.stats.get_stats("x@y").await.unwrap().is_none());
        assert!(storage.resources.get_resources("x@y").await.unwrap().is_none());
        assert!(storage.syllabus.get_completed("x@y").await.unwrap().is_empty());
        assert!(storage.leaderboard.list_leaderboard().await.unwrap().is_empty());
        assert!(storage.notes.list_notes("x@y").await.unwrap().is_empty());
        assert!(storage.routines.get_routine("x@y").await.unwrap().is_none());
        assert!(storage.session.load_session().await.unwrap().is_none());
    }
}
