use buddy_core::model::{NewQuizResult, ProfileUpdate, UserId, UserProfile};
use buddy_core::time::fixed_now;
use chrono::Duration;
use storage::live::{LiveStore, Operation, PermissionError};
use storage::repository::{ProfileRepository, QuizResultRepository, Storage};
use storage::sqlite::SqliteRepository;

fn user(raw: &str) -> UserId {
    UserId::new(raw).unwrap()
}

fn profile(raw: &str, update: ProfileUpdate, days: i64) -> UserProfile {
    UserProfile::create(user(raw), update, fixed_now() + Duration::days(days)).unwrap()
}

#[tokio::test]
async fn sqlite_profile_upsert_merges_fields() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_profiles?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let first = profile(
        "u1",
        ProfileUpdate {
            display_name: Some("Ada Lovelace".into()),
            email: Some("ada@example.com".into()),
            photo_url: Some("https://example.com/ada.png".into()),
        },
        0,
    );
    let stored = repo.upsert_profile(&first).await.unwrap();
    assert_eq!(stored, first);

    let second = profile(
        "u1",
        ProfileUpdate {
            email: Some("countess@example.com".into()),
            ..ProfileUpdate::default()
        },
        7,
    );
    let merged = repo.upsert_profile(&second).await.unwrap();
    assert_eq!(merged.display_name(), Some("Ada Lovelace"));
    assert_eq!(merged.email(), Some("countess@example.com"));
    assert_eq!(merged.photo_url(), Some("https://example.com/ada.png"));
    assert_eq!(merged.created_at(), fixed_now());

    let fetched = repo.get_profile(&user("u1")).await.unwrap();
    assert_eq!(fetched, Some(merged));
    assert_eq!(repo.get_profile(&user("u2")).await.unwrap(), None);
}

#[tokio::test]
async fn sqlite_lists_results_newest_first() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_results?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");
    // Running twice is a no-op.
    repo.migrate().await.expect("migrate again");

    for (who, topic, score, days) in [
        ("u1", "Photosynthesis", 3, 0),
        ("u1", "Roman Empire", 5, 2),
        ("u2", "Algebra", 1, 1),
        ("u1", "Photosynthesis", 4, 1),
    ] {
        let new = NewQuizResult::new(
            user(who),
            topic,
            score,
            5,
            fixed_now() + Duration::days(days),
        )
        .unwrap();
        let stored = repo.append_result(&new).await.unwrap();
        assert!(stored.id().value() > 0);
    }

    let listed = repo.list_results(&user("u1"), 10).await.unwrap();
    let scores: Vec<u32> = listed.iter().map(|r| r.score()).collect();
    assert_eq!(scores, vec![5, 4, 3]);
    assert_eq!(listed[0].topic(), "Roman Empire");
    assert_eq!(listed[0].completed_at(), fixed_now() + Duration::days(2));

    let limited = repo.list_results(&user("u1"), 2).await.unwrap();
    assert_eq!(limited.len(), 2);
}

#[tokio::test]
async fn live_store_over_sqlite_notifies_and_enforces_owner() {
    let storage = Storage::sqlite("sqlite:file:memdb_live?mode=memory&cache=shared")
        .await
        .expect("storage");
    let store = LiveStore::new(storage);
    store.set_viewer(Some(user("u1")));

    let mut results = store.subscribe_results(user("u1"), 10);
    assert_eq!(results.next().await.map(|r| r.len()), Some(0));

    let new = NewQuizResult::new(user("u1"), "Chemistry", 2, 3, fixed_now()).unwrap();
    store.append_result(&new).await.unwrap();
    let snapshot = results.next().await.unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].percent(), 66);

    let foreign = NewQuizResult::new(user("u2"), "Chemistry", 3, 3, fixed_now()).unwrap();
    let err = store.append_result(&foreign).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        PermissionError {
            path: "users/u2/quizResults".into(),
            operation: Operation::Create,
        }
        .to_string()
    );
}
