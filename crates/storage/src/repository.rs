use async_trait::async_trait;
use buddy_core::model::{
    NewQuizResult, ProfileUpdate, QuizResult, QuizResultId, UserId, UserProfile,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::live::PermissionError;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    PermissionDenied(#[from] PermissionError),
}

/// Repository contract for user profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch a profile; `None` when the user has never signed in.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, StorageError>;

    /// Insert or merge a profile and return what is now stored.
    ///
    /// Fields the incoming profile leaves empty keep their stored value, and
    /// `created_at` is only written on insert.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the profile cannot be stored.
    async fn upsert_profile(&self, profile: &UserProfile) -> Result<UserProfile, StorageError>;
}

/// Repository contract for finished quizzes.
#[async_trait]
pub trait QuizResultRepository: Send + Sync {
    /// Append a result and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the result cannot be stored.
    async fn append_result(&self, result: &NewQuizResult) -> Result<QuizResult, StorageError>;

    /// Most recent results for a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn list_results(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<QuizResult>, StorageError>;
}

/// Merge `incoming` over `existing` the way both backends do.
pub(crate) fn merge_profiles(
    existing: &UserProfile,
    incoming: &UserProfile,
) -> Result<UserProfile, StorageError> {
    let update = ProfileUpdate {
        display_name: incoming.display_name().map(str::to_owned),
        email: incoming.email().map(str::to_owned),
        photo_url: incoming.photo_url().map(str::to_owned),
    };
    existing
        .merged(update)
        .map_err(|e| StorageError::Serialization(e.to_string()))
}

#[derive(Default)]
struct ResultLog {
    next_id: i64,
    rows: Vec<QuizResult>,
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    profiles: Arc<Mutex<HashMap<UserId, UserProfile>>>,
    results: Arc<Mutex<ResultLog>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryRepository {
    async fn get_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, StorageError> {
        let guard = self
            .profiles
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(user_id).cloned())
    }

    async fn upsert_profile(&self, profile: &UserProfile) -> Result<UserProfile, StorageError> {
        let mut guard = self
            .profiles
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let stored = match guard.get(profile.user_id()) {
            Some(existing) => merge_profiles(existing, profile)?,
            None => profile.clone(),
        };
        guard.insert(stored.user_id().clone(), stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl QuizResultRepository for InMemoryRepository {
    async fn append_result(&self, result: &NewQuizResult) -> Result<QuizResult, StorageError> {
        let mut guard = self
            .results
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.next_id += 1;
        let stored = result.clone().with_id(QuizResultId::new(guard.next_id));
        guard.rows.push(stored.clone());
        Ok(stored)
    }

    async fn list_results(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<QuizResult>, StorageError> {
        let guard = self
            .results
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut found: Vec<QuizResult> = guard
            .rows
            .iter()
            .filter(|row| row.user_id() == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            b.completed_at()
                .cmp(&a.completed_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        found.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(found)
    }
}

/// Aggregates profile and quiz-result repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub profiles: Arc<dyn ProfileRepository>,
    pub quiz_results: Arc<dyn QuizResultRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let profiles: Arc<dyn ProfileRepository> = Arc::new(repo.clone());
        let quiz_results: Arc<dyn QuizResultRepository> = Arc::new(repo);
        Self {
            profiles,
            quiz_results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buddy_core::time::fixed_now;
    use chrono::Duration;

    fn user(raw: &str) -> UserId {
        UserId::new(raw).unwrap()
    }

    fn profile(raw: &str, name: Option<&str>, email: Option<&str>) -> UserProfile {
        UserProfile::create(
            user(raw),
            ProfileUpdate {
                display_name: name.map(str::to_owned),
                email: email.map(str::to_owned),
                photo_url: None,
            },
            fixed_now(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn upsert_merges_and_keeps_created_at() {
        let repo = InMemoryRepository::new();
        repo.upsert_profile(&profile("u1", Some("Ada Lovelace"), Some("ada@example.com")))
            .await
            .unwrap();

        let later = UserProfile::create(
            user("u1"),
            ProfileUpdate {
                display_name: Some("Ada King".into()),
                ..ProfileUpdate::default()
            },
            fixed_now() + Duration::days(3),
        )
        .unwrap();
        let stored = repo.upsert_profile(&later).await.unwrap();

        assert_eq!(stored.display_name(), Some("Ada King"));
        assert_eq!(stored.email(), Some("ada@example.com"));
        assert_eq!(stored.created_at(), fixed_now());
        assert_eq!(repo.get_profile(&user("u1")).await.unwrap(), Some(stored));
        assert_eq!(repo.get_profile(&user("nobody")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn lists_results_newest_first_per_user() {
        let repo = InMemoryRepository::new();
        for (who, topic, days) in [("u1", "Rust", 0), ("u2", "Go", 1), ("u1", "Chess", 2)] {
            let new = NewQuizResult::new(user(who), topic, 3, 5, fixed_now() + Duration::days(days))
                .unwrap();
            repo.append_result(&new).await.unwrap();
        }

        let listed = repo.list_results(&user("u1"), 10).await.unwrap();
        let topics: Vec<_> = listed.iter().map(QuizResult::topic).collect();
        assert_eq!(topics, vec!["Chess", "Rust"]);
        assert_eq!(listed[0].id(), QuizResultId::new(3));

        let limited = repo.list_results(&user("u1"), 1).await.unwrap();
        assert_eq!(limited.len(), 1);
    }
}
