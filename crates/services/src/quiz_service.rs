use std::sync::Arc;

use buddy_core::model::{QuizQuestion, QuizResult, QuizSession, QuizSetup, QuizState};
use tracing::{debug, warn};

use crate::error::{GenerationError, StudyError};
use crate::flows::{FlowRunner, GenerateQuiz, GenerateQuizInput};
use crate::profile_service::ProfileService;

/// Drives a [`QuizSession`] through generation and records finished quizzes.
#[derive(Clone)]
pub struct QuizService {
    runner: FlowRunner,
    profiles: Option<Arc<ProfileService>>,
}

impl QuizService {
    #[must_use]
    pub fn new(runner: FlowRunner, profiles: Option<Arc<ProfileService>>) -> Self {
        Self { runner, profiles }
    }

    /// One generation call, without touching any session.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` when the call fails or the quiz breaks the schema.
    pub async fn generate(&self, setup: &QuizSetup) -> Result<Vec<QuizQuestion>, GenerationError> {
        let input = GenerateQuizInput::from(setup);
        let output = self.runner.run::<GenerateQuiz>(&input).await?;
        Ok(output.quiz)
    }

    /// Validate, generate and load a quiz into `session`.
    ///
    /// On success the session is `Active`. On a generation failure it is back
    /// in `Setup` carrying the error message. Invalid input leaves it untouched.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Validation` for bad input, `StudyError::Quiz` when
    /// the session is not in `Setup`, and `StudyError::Generation` when the
    /// model call fails.
    pub async fn start_quiz(
        &self,
        session: &mut QuizSession,
        topic: &str,
        num_questions: u32,
    ) -> Result<(), StudyError> {
        let setup = QuizSetup::new(topic, num_questions)?;
        session.begin_generation(&setup)?;
        debug!(topic = %setup.topic(), count = setup.question_count(), "generating quiz");

        match self.generate(&setup).await {
            Ok(questions) => {
                session.activate(questions)?;
                Ok(())
            }
            Err(err) => {
                session.fail_generation(err.to_string())?;
                Err(err.into())
            }
        }
    }

    /// Advance the session and, on reaching results, record them.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Quiz` outside `Active`. Recording failures are logged only.
    pub async fn advance(&self, session: &mut QuizSession) -> Result<QuizState, StudyError> {
        let state = session.advance()?;
        if state == QuizState::Results {
            self.record_result(session).await;
        }
        Ok(state)
    }

    /// Append a finished quiz to the viewer's history when a store is configured.
    ///
    /// Never fails the quiz: problems are logged and yield `None`.
    pub async fn record_result(&self, session: &QuizSession) -> Option<QuizResult> {
        let profiles = self.profiles.as_ref()?;
        match profiles.record_result(session).await {
            Ok(Some(stored)) => {
                debug!(id = ?stored.id(), score = stored.score(), "quiz result recorded");
                Some(stored)
            }
            Ok(None) => {
                debug!("no signed-in user; quiz result not recorded");
                None
            }
            Err(err) => {
                warn!(error = %err, "quiz result not recorded");
                None
            }
        }
    }
}
