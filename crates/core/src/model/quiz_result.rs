use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::{QuizResultId, UserId};
use crate::model::quiz_session::{QuizSession, QuizState};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizResultError {
    #[error("quiz has no questions")]
    EmptyQuiz,

    #[error("score {score} exceeds total {total}")]
    ScoreAboveTotal { score: u32, total: u32 },

    #[error("quiz is not finished")]
    NotFinished,
}

/// A finished quiz waiting to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuizResult {
    user_id: UserId,
    topic: String,
    score: u32,
    total: u32,
    completed_at: DateTime<Utc>,
}

impl NewQuizResult {
    /// # Errors
    ///
    /// Returns `QuizResultError` when `total` is zero or below `score`.
    pub fn new(
        user_id: UserId,
        topic: impl Into<String>,
        score: u32,
        total: u32,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, QuizResultError> {
        if total == 0 {
            return Err(QuizResultError::EmptyQuiz);
        }
        if score > total {
            return Err(QuizResultError::ScoreAboveTotal { score, total });
        }
        Ok(Self {
            user_id,
            topic: topic.into(),
            score,
            total,
            completed_at,
        })
    }

    /// Snapshot of a session sitting in `Results`.
    ///
    /// # Errors
    ///
    /// Returns `QuizResultError::NotFinished` for any other state.
    pub fn from_session(
        user_id: UserId,
        session: &QuizSession,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, QuizResultError> {
        if session.state() != QuizState::Results {
            return Err(QuizResultError::NotFinished);
        }
        let total = u32::try_from(session.questions().len()).unwrap_or(u32::MAX);
        Self::new(user_id, session.topic(), session.score(), total, completed_at)
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn with_id(self, id: QuizResultId) -> QuizResult {
        QuizResult { id, inner: self }
    }
}

/// A stored quiz result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    id: QuizResultId,
    inner: NewQuizResult,
}

impl QuizResult {
    #[must_use]
    pub fn id(&self) -> QuizResultId {
        self.id
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        self.inner.user_id()
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        self.inner.topic()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.inner.score()
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.inner.total()
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.inner.completed_at()
    }

    /// Score as a whole percentage, rounded down.
    #[must_use]
    pub fn percent(&self) -> u32 {
        self.score() * 100 / self.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn rejects_impossible_scores() {
        let user = UserId::new("u").unwrap();
        assert_eq!(
            NewQuizResult::new(user.clone(), "Math", 0, 0, fixed_now()),
            Err(QuizResultError::EmptyQuiz)
        );
        assert_eq!(
            NewQuizResult::new(user, "Math", 4, 3, fixed_now()),
            Err(QuizResultError::ScoreAboveTotal { score: 4, total: 3 })
        );
    }

    #[test]
    fn unfinished_session_is_not_a_result() {
        let user = UserId::new("u").unwrap();
        let session = QuizSession::new();
        assert_eq!(
            NewQuizResult::from_session(user, &session, fixed_now()),
            Err(QuizResultError::NotFinished)
        );
    }

    #[test]
    fn percent_rounds_down() {
        let user = UserId::new("u").unwrap();
        let result = NewQuizResult::new(user, "Math", 2, 3, fixed_now())
            .unwrap()
            .with_id(QuizResultId::new(1));
        assert_eq!(result.percent(), 66);
    }
}
