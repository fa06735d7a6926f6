//! Permission-checked access to a user's documents with change subscriptions.
//!
//! A [`LiveStore`] acts for one viewer. Reads and writes of another user's
//! documents are refused with a [`PermissionError`]. Subscriptions yield the
//! current snapshot first and a fresh one after every write to the watched
//! path; failures are published on the [`ErrorEmitter`] and end the
//! subscription.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, Weak};

use async_trait::async_trait;
use buddy_core::model::{NewQuizResult, QuizResult, UserId, UserProfile};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::repository::{Storage, StorageError};

const CHANGE_FEED_CAPACITY: usize = 64;
const ERROR_FEED_CAPACITY: usize = 16;

/// Default number of quiz results a results subscription yields.
pub const DEFAULT_RESULTS_LIMIT: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Get,
    List,
    Create,
    Update,
    Delete,
    Write,
}

impl Operation {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Get => "get",
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Write => "write",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A refused document access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing or insufficient permissions: {operation} on {path}")]
pub struct PermissionError {
    pub path: String,
    pub operation: Operation,
}

#[must_use]
pub fn profile_path(user_id: &UserId) -> String {
    format!("users/{user_id}")
}

#[must_use]
pub fn results_path(user_id: &UserId) -> String {
    format!("users/{user_id}/quizResults")
}

/// Side channel for permission failures raised outside a request/response call.
#[derive(Clone)]
pub struct ErrorEmitter {
    tx: broadcast::Sender<PermissionError>,
}

impl ErrorEmitter {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(ERROR_FEED_CAPACITY);
        Self { tx }
    }

    pub fn emit(&self, error: PermissionError) {
        // No listener is fine; the error is still logged.
        warn!(path = %error.path, operation = %error.operation, "permission denied");
        let _ = self.tx.send(error);
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PermissionError> {
        self.tx.subscribe()
    }
}

impl Default for ErrorEmitter {
    fn default() -> Self {
        Self::new()
    }
}

/// A write that subscriptions may care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Profile(UserId),
    QuizResults(UserId),
}

struct LiveInner {
    storage: Storage,
    viewer: RwLock<Option<UserId>>,
    changes: broadcast::Sender<Change>,
    errors: ErrorEmitter,
}

impl LiveInner {
    fn viewer(&self) -> Option<UserId> {
        self.viewer
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn authorize(
        &self,
        owner: &UserId,
        path: String,
        operation: Operation,
    ) -> Result<(), PermissionError> {
        match self.viewer() {
            Some(viewer) if &viewer == owner => Ok(()),
            _ => Err(PermissionError { path, operation }),
        }
    }

    fn publish(&self, change: Change) {
        debug!(?change, "store change");
        let _ = self.changes.send(change);
    }
}

#[derive(Clone)]
pub struct LiveStore {
    inner: Arc<LiveInner>,
}

impl LiveStore {
    #[must_use]
    pub fn new(storage: Storage) -> Self {
        let (changes, _rx) = broadcast::channel(CHANGE_FEED_CAPACITY);
        Self {
            inner: Arc::new(LiveInner {
                storage,
                viewer: RwLock::new(None),
                changes,
                errors: ErrorEmitter::new(),
            }),
        }
    }

    #[must_use]
    pub fn viewer(&self) -> Option<UserId> {
        self.inner.viewer()
    }

    pub fn set_viewer(&self, viewer: Option<UserId>) {
        *self
            .inner
            .viewer
            .write()
            .unwrap_or_else(PoisonError::into_inner) = viewer;
    }

    #[must_use]
    pub fn errors(&self) -> &ErrorEmitter {
        &self.inner.errors
    }

    /// # Errors
    ///
    /// Returns `StorageError::PermissionDenied` when the profile is not the viewer's.
    pub async fn get_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, StorageError> {
        self.inner
            .authorize(user_id, profile_path(user_id), Operation::Get)?;
        self.inner.storage.profiles.get_profile(user_id).await
    }

    /// Merge-write the viewer's own profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::PermissionDenied` when the profile is not the viewer's,
    /// or the backend error if the write fails.
    pub async fn upsert_profile(&self, profile: &UserProfile) -> Result<UserProfile, StorageError> {
        let user_id = profile.user_id();
        self.inner
            .authorize(user_id, profile_path(user_id), Operation::Write)?;
        let stored = self.inner.storage.profiles.upsert_profile(profile).await?;
        self.inner.publish(Change::Profile(user_id.clone()));
        Ok(stored)
    }

    /// # Errors
    ///
    /// Returns `StorageError::PermissionDenied` when the result is not the viewer's,
    /// or the backend error if the write fails.
    pub async fn append_result(&self, result: &NewQuizResult) -> Result<QuizResult, StorageError> {
        let user_id = result.user_id();
        self.inner
            .authorize(user_id, results_path(user_id), Operation::Create)?;
        let stored = self.inner.storage.quiz_results.append_result(result).await?;
        self.inner.publish(Change::QuizResults(user_id.clone()));
        Ok(stored)
    }

    /// # Errors
    ///
    /// Returns `StorageError::PermissionDenied` when the results are not the viewer's.
    pub async fn list_results(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<QuizResult>, StorageError> {
        self.inner
            .authorize(user_id, results_path(user_id), Operation::List)?;
        self.inner
            .storage
            .quiz_results
            .list_results(user_id, limit)
            .await
    }

    #[must_use]
    pub fn subscribe_profile(&self, user_id: UserId) -> Subscription<ProfileWatch> {
        self.subscribe(ProfileWatch { user_id })
    }

    #[must_use]
    pub fn subscribe_results(&self, user_id: UserId, limit: u32) -> Subscription<ResultsWatch> {
        self.subscribe(ResultsWatch { user_id, limit })
    }

    fn subscribe<W: Watch>(&self, watch: W) -> Subscription<W> {
        Subscription {
            store: Arc::downgrade(&self.inner),
            changes: self.inner.changes.subscribe(),
            watch,
            phase: Phase::Initial,
        }
    }
}

/// What a subscription follows.
#[async_trait]
pub trait Watch: Send + Sync + 'static {
    type Snapshot: Send;

    fn owner(&self) -> &UserId;

    fn path(&self) -> String;

    fn operation(&self) -> Operation;

    fn is_affected_by(&self, change: &Change) -> bool;

    async fn fetch(&self, storage: &Storage) -> Result<Self::Snapshot, StorageError>;
}

/// A single profile document. `None` until the user first signs in.
pub struct ProfileWatch {
    user_id: UserId,
}

#[async_trait]
impl Watch for ProfileWatch {
    type Snapshot = Option<UserProfile>;

    fn owner(&self) -> &UserId {
        &self.user_id
    }

    fn path(&self) -> String {
        profile_path(&self.user_id)
    }

    fn operation(&self) -> Operation {
        Operation::Get
    }

    fn is_affected_by(&self, change: &Change) -> bool {
        matches!(change, Change::Profile(user) if user == &self.user_id)
    }

    async fn fetch(&self, storage: &Storage) -> Result<Self::Snapshot, StorageError> {
        storage.profiles.get_profile(&self.user_id).await
    }
}

/// The newest quiz results of one user.
pub struct ResultsWatch {
    user_id: UserId,
    limit: u32,
}

#[async_trait]
impl Watch for ResultsWatch {
    type Snapshot = Vec<QuizResult>;

    fn owner(&self) -> &UserId {
        &self.user_id
    }

    fn path(&self) -> String {
        results_path(&self.user_id)
    }

    fn operation(&self) -> Operation {
        Operation::List
    }

    fn is_affected_by(&self, change: &Change) -> bool {
        matches!(change, Change::QuizResults(user) if user == &self.user_id)
    }

    async fn fetch(&self, storage: &Storage) -> Result<Self::Snapshot, StorageError> {
        storage
            .quiz_results
            .list_results(&self.user_id, self.limit)
            .await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Initial,
    Live,
    Closed,
}

/// Stream of snapshots for one path. Dropping it unsubscribes.
///
/// Holds only a weak handle to the store, so it never keeps the backend alive.
pub struct Subscription<W: Watch> {
    store: Weak<LiveInner>,
    changes: broadcast::Receiver<Change>,
    watch: W,
    phase: Phase,
}

impl<W: Watch> Subscription<W> {
    #[must_use]
    pub fn path(&self) -> String {
        self.watch.path()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.phase == Phase::Closed
    }

    /// Next snapshot, or `None` once the subscription has ended.
    pub async fn next(&mut self) -> Option<W::Snapshot> {
        loop {
            match self.phase {
                Phase::Closed => return None,
                Phase::Initial => {
                    self.phase = Phase::Live;
                    return self.snapshot().await;
                }
                Phase::Live => match self.changes.recv().await {
                    Ok(change) if self.watch.is_affected_by(&change) => {
                        return self.snapshot().await;
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        debug!(skipped, path = %self.watch.path(), "subscription lagged, refetching");
                        return self.snapshot().await;
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        self.phase = Phase::Closed;
                        return None;
                    }
                },
            }
        }
    }

    async fn snapshot(&mut self) -> Option<W::Snapshot> {
        let Some(store) = self.store.upgrade() else {
            self.phase = Phase::Closed;
            return None;
        };
        let path = self.watch.path();
        if let Err(denied) = store.authorize(self.watch.owner(), path.clone(), self.watch.operation())
        {
            store.errors.emit(denied);
            self.phase = Phase::Closed;
            return None;
        }
        match self.watch.fetch(&store.storage).await {
            Ok(snapshot) => Some(snapshot),
            Err(StorageError::PermissionDenied(denied)) => {
                store.errors.emit(denied);
                self.phase = Phase::Closed;
                None
            }
            Err(err) => {
                warn!(%path, error = %err, "subscription fetch failed");
                self.phase = Phase::Closed;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buddy_core::model::ProfileUpdate;
    use buddy_core::time::fixed_now;

    fn user(raw: &str) -> UserId {
        UserId::new(raw).unwrap()
    }

    fn named(raw: &str, name: &str) -> UserProfile {
        UserProfile::create(
            user(raw),
            ProfileUpdate {
                display_name: Some(name.into()),
                ..ProfileUpdate::default()
            },
            fixed_now(),
        )
        .unwrap()
    }

    fn signed_in(raw: &str) -> LiveStore {
        let store = LiveStore::new(Storage::in_memory());
        store.set_viewer(Some(user(raw)));
        store
    }

    #[tokio::test]
    async fn profile_subscription_yields_initial_then_each_write() {
        let store = signed_in("u1");
        let mut sub = store.subscribe_profile(user("u1"));

        assert_eq!(sub.next().await, Some(None));

        store.upsert_profile(&named("u1", "Ada")).await.unwrap();
        let first = sub.next().await.flatten().unwrap();
        assert_eq!(first.display_name(), Some("Ada"));

        store.upsert_profile(&named("u1", "Grace")).await.unwrap();
        let second = sub.next().await.flatten().unwrap();
        assert_eq!(second.display_name(), Some("Grace"));
    }

    #[tokio::test]
    async fn results_subscription_ignores_other_paths() {
        let store = signed_in("u1");
        let mut sub = store.subscribe_results(user("u1"), DEFAULT_RESULTS_LIMIT);
        assert_eq!(sub.next().await, Some(Vec::new()));

        store.upsert_profile(&named("u1", "Ada")).await.unwrap();
        let result = NewQuizResult::new(user("u1"), "Rust", 4, 5, fixed_now()).unwrap();
        store.append_result(&result).await.unwrap();

        let listed = sub.next().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].topic(), "Rust");
    }

    #[tokio::test]
    async fn foreign_profile_publishes_permission_error_and_ends() {
        let store = signed_in("u1");
        let mut errors = store.errors().subscribe();
        let mut sub = store.subscribe_profile(user("u2"));

        assert_eq!(sub.next().await, None);
        assert!(sub.is_closed());
        assert_eq!(sub.next().await, None);

        let published = errors.recv().await.unwrap();
        assert_eq!(
            published,
            PermissionError {
                path: "users/u2".into(),
                operation: Operation::Get,
            }
        );
    }

    #[tokio::test]
    async fn requests_without_viewer_are_denied() {
        let store = LiveStore::new(Storage::in_memory());
        let err = store.get_profile(&user("u1")).await.unwrap_err();
        assert!(matches!(
            err,
            StorageError::PermissionDenied(PermissionError { operation: Operation::Get, .. })
        ));

        let result = NewQuizResult::new(user("u1"), "Rust", 1, 3, fixed_now()).unwrap();
        let err = store.append_result(&result).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing or insufficient permissions: create on users/u1/quizResults"
        );
    }

    #[tokio::test]
    async fn subscription_ends_when_store_is_dropped() {
        let store = signed_in("u1");
        let mut sub = store.subscribe_profile(user("u1"));
        assert_eq!(sub.next().await, Some(None));
        drop(store);
        assert_eq!(sub.next().await, None);
    }
}
