use buddy_core::model::{
    NewQuizResult, ProfileUpdate, ProgressReport, QuizResult, QuizSession, UserId, UserProfile,
};
use storage::live::{
    DEFAULT_RESULTS_LIMIT, ErrorEmitter, LiveStore, ProfileWatch, ResultsWatch, Subscription,
};
use tracing::info;

use crate::Clock;
use crate::error::StudyError;

/// Signed-in user, their profile, and their quiz history.
#[derive(Clone)]
pub struct ProfileService {
    clock: Clock,
    live: LiveStore,
}

impl ProfileService {
    #[must_use]
    pub fn new(clock: Clock, live: LiveStore) -> Self {
        Self { clock, live }
    }

    #[must_use]
    pub fn viewer(&self) -> Option<UserId> {
        self.live.viewer()
    }

    #[must_use]
    pub fn errors(&self) -> &ErrorEmitter {
        self.live.errors()
    }

    /// Make `user_id` the viewer and merge `update` into their profile.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Validation` for a bad photo URL, or the storage
    /// failure if the profile cannot be written.
    pub async fn sign_in(
        &self,
        user_id: UserId,
        update: ProfileUpdate,
    ) -> Result<UserProfile, StudyError> {
        let profile = UserProfile::create(user_id.clone(), update, self.clock.now())?;
        self.live.set_viewer(Some(user_id));
        let stored = self.live.upsert_profile(&profile).await?;
        info!(user = %stored.user_id(), "signed in");
        Ok(stored)
    }

    pub fn sign_out(&self) {
        self.live.set_viewer(None);
    }

    /// # Errors
    ///
    /// Returns `StudyError::Permission` for anyone but the viewer.
    pub async fn profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, StudyError> {
        Ok(self.live.get_profile(user_id).await?)
    }

    /// # Errors
    ///
    /// Returns `StudyError::Permission` for anyone but the viewer.
    pub async fn progress(&self, user_id: &UserId) -> Result<ProgressReport, StudyError> {
        let results = self
            .live
            .list_results(user_id, DEFAULT_RESULTS_LIMIT)
            .await?;
        Ok(ProgressReport::from_results(&results))
    }

    /// Store a finished quiz for the viewer. `Ok(None)` when nobody is signed in.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::QuizResult` if the session has not reached results,
    /// or the storage failure.
    pub async fn record_result(
        &self,
        session: &QuizSession,
    ) -> Result<Option<QuizResult>, StudyError> {
        let Some(viewer) = self.viewer() else {
            return Ok(None);
        };
        let result = NewQuizResult::from_session(viewer, session, self.clock.now())?;
        let stored = self.live.append_result(&result).await?;
        Ok(Some(stored))
    }

    #[must_use]
    pub fn subscribe_profile(&self, user_id: UserId) -> Subscription<ProfileWatch> {
        self.live.subscribe_profile(user_id)
    }

    #[must_use]
    pub fn subscribe_results(&self, user_id: UserId) -> Subscription<ResultsWatch> {
        self.live.subscribe_results(user_id, DEFAULT_RESULTS_LIMIT)
    }
}
