use prep_core::model::{Account, Period, Routine, SessionUser, Stats};
use prep_core::syllabus::{CompletedTopics, default_syllabus};
use storage::kv::KeyValueStore;
use storage::repository::{Storage, StorageError};
use storage::sqlite::SqliteStore;

#[tokio::test]
async fn sqlite_store_overwrites_and_removes() {
    let store = SqliteStore::connect("sqlite:file:memdb_kv_basic?mode=memory&cache=shared")
        .await
        .expect("connect");
    store.migrate().await.expect("migrate");
    // migrations are idempotent
    store.migrate().await.expect("migrate twice");

    assert_eq!(store.get("missing").await.unwrap(), None);
    store.set("k", "[1]").await.unwrap();
    store.set("k", "[1,2]").await.unwrap();
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("[1,2]"));

    store.remove("k").await.unwrap();
    assert_eq!(store.get("k").await.unwrap(), None);
}

#[tokio::test]
async fn sqlite_storage_round_trips_entities() {
    let storage = Storage::sqlite("sqlite:file:memdb_entities?mode=memory&cache=shared")
        .await
        .expect("storage");

    let account = Account::register("hari@example.np", "secret1", "Hari").unwrap();
    storage.accounts.insert_account(&account).await.unwrap();
    let dup = Account::register("hari@example.np", "another1", "Other").unwrap();
    assert!(matches!(
        storage.accounts.insert_account(&dup).await,
        Err(StorageError::Conflict)
    ));
    assert_eq!(storage.accounts.list_accounts().await.unwrap(), vec![account]);

    let user = SessionUser {
        email: "hari@example.np".into(),
        name: "Hari".into(),
    };
    storage.session.save_session(&user).await.unwrap();
    assert_eq!(storage.session.load_session().await.unwrap(), Some(user));

    let stats = Stats {
        mcq_sets: 2,
        typing_minutes: 15,
        ..Stats::default()
    };
    storage.stats.save_stats("hari@example.np", &stats).await.unwrap();
    assert_eq!(
        storage.stats.get_stats("hari@example.np").await.unwrap(),
        Some(stats)
    );

    let mut routine = Routine::default();
    routine.add(Period::Morning);
    storage
        .routines
        .save_routine("hari@example.np", &routine)
        .await
        .unwrap();
    let loaded = storage
        .routines
        .get_routine("hari@example.np")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.morning.len(), 6);

    let syllabus = default_syllabus();
    let mut done = CompletedTopics::default();
    done.toggle(&syllabus, "w-network").unwrap();
    storage
        .syllabus
        .save_completed("hari@example.np", &done)
        .await
        .unwrap();
    assert!(
        storage
            .syllabus
            .get_completed("hari@example.np")
            .await
            .unwrap()
            .contains("w-network")
    );
}
