use std::sync::Arc;

use async_trait::async_trait;
use prep_core::model::{SessionUser, StatKey};
use services::{AuthError, AuthService, StatsService, StatsServiceError};
use storage::keys;
use storage::kv::{InMemoryStore, KeyValueStore};
use storage::repository::{StorageError, Storage};

/// Reads pass through; every write fails.
struct ReadOnlyStore {
    inner: InMemoryStore,
}

#[async_trait]
impl KeyValueStore for ReadOnlyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("read-only".into()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("read-only".into()))
    }
}

#[tokio::test]
async fn failed_write_leaves_user_signed_out() {
    let storage = Storage::from_store(Arc::new(ReadOnlyStore {
        inner: InMemoryStore::new(),
    }));
    let auth = AuthService::new(Arc::clone(&storage.accounts), Arc::clone(&storage.session));

    let err = auth
        .register("ram@example.com", "secret1", "Ram")
        .await
        .expect_err("write should fail");
    assert!(matches!(err, AuthError::Storage(StorageError::Connection(_))));
    assert_eq!(auth.current_user(), None);
}

#[tokio::test]
async fn malformed_stats_blob_is_reported_not_reset() {
    let store = InMemoryStore::new();
    store
        .set(&keys::stats("ram@example.com"), "{not json")
        .await
        .expect("seed blob");
    let storage = Storage::from_store(Arc::new(store.clone()));
    let stats = StatsService::new(Arc::clone(&storage.stats));
    let user = SessionUser {
        email: "ram@example.com".into(),
        name: "Ram".into(),
    };

    let err = stats
        .increment(&user, StatKey::McqSets, 1)
        .await
        .expect_err("malformed blob");
    assert!(matches!(
        err,
        StatsServiceError::Storage(StorageError::Serialization(_))
    ));
    assert_eq!(
        store
            .get(&keys::stats("ram@example.com"))
            .await
            .expect("read blob")
            .as_deref(),
        Some("{not json")
    );
}
