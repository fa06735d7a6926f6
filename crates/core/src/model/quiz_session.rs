use thiserror::Error;

use crate::model::forms::QuizSetup;
use crate::model::quiz::{QuizQuestion, score_answers};

/// Lifecycle of a practice quiz.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum QuizState {
    #[default]
    Setup,
    Generating,
    Active,
    Results,
}

impl QuizState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuizState::Setup => "setup",
            QuizState::Generating => "generating",
            QuizState::Active => "active",
            QuizState::Results => "results",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSessionError {
    #[error("cannot {action} while the quiz is in {}", .state.as_str())]
    InvalidTransition {
        action: &'static str,
        state: QuizState,
    },

    #[error("question {index} is out of range for {len} questions")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("the quiz generator returned no questions")]
    NoQuestions,
}

/// Client-held state of one practice quiz.
///
/// Invariants:
/// - `user_answers.len() == questions.len()` at all times.
/// - `current_index < questions.len()` while `Active`.
/// - `score` is only written on the transition into `Results`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizSession {
    topic: String,
    requested_count: u32,
    questions: Vec<QuizQuestion>,
    user_answers: Vec<String>,
    current_index: usize,
    score: u32,
    state: QuizState,
    error: Option<String>,
}

impl QuizSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Setup → Generating.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the session is in `Setup`.
    pub fn begin_generation(&mut self, setup: &QuizSetup) -> Result<(), QuizSessionError> {
        self.expect_state(QuizState::Setup, "start a quiz")?;
        self.topic = setup.topic().to_string();
        self.requested_count = setup.question_count();
        self.questions.clear();
        self.user_answers.clear();
        self.current_index = 0;
        self.score = 0;
        self.error = None;
        self.state = QuizState::Generating;
        Ok(())
    }

    /// Generating → Active with the generated questions, however many arrived.
    ///
    /// An empty batch reverts to `Setup` with an error, like any failed generation.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` outside `Generating` and `NoQuestions` for an empty batch.
    pub fn activate(&mut self, questions: Vec<QuizQuestion>) -> Result<(), QuizSessionError> {
        self.expect_state(QuizState::Generating, "load questions")?;
        if questions.is_empty() {
            let err = QuizSessionError::NoQuestions;
            self.revert_to_setup(err.to_string());
            return Err(err);
        }
        self.user_answers = vec![String::new(); questions.len()];
        self.questions = questions;
        self.current_index = 0;
        self.state = QuizState::Active;
        Ok(())
    }

    /// Generating → Setup, keeping the message for display.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` outside `Generating`.
    pub fn fail_generation(&mut self, message: impl Into<String>) -> Result<(), QuizSessionError> {
        self.expect_state(QuizState::Generating, "report a generation failure")?;
        self.revert_to_setup(message.into());
        Ok(())
    }

    /// Overwrites the answer at `index`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` outside `Active` and `IndexOutOfRange` for a bad index.
    pub fn select_answer(
        &mut self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), QuizSessionError> {
        self.expect_state(QuizState::Active, "select an answer")?;
        let len = self.user_answers.len();
        let slot = self
            .user_answers
            .get_mut(index)
            .ok_or(QuizSessionError::IndexOutOfRange { index, len })?;
        *slot = value.into();
        Ok(())
    }

    /// Answers the question currently shown.
    ///
    /// # Errors
    ///
    /// Same as [`Self::select_answer`].
    pub fn select_current(&mut self, value: impl Into<String>) -> Result<(), QuizSessionError> {
        self.select_answer(self.current_index, value)
    }

    /// Moves to the next question, or scores the quiz on the last one.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` outside `Active`.
    pub fn advance(&mut self) -> Result<QuizState, QuizSessionError> {
        self.expect_state(QuizState::Active, "advance")?;
        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
        } else {
            self.score = score_answers(&self.questions, &self.user_answers);
            self.state = QuizState::Results;
        }
        Ok(self.state)
    }

    /// Back to a blank `Setup` from any state.
    pub fn restart(&mut self) {
        *self = Self::default();
    }

    fn revert_to_setup(&mut self, message: String) {
        self.questions.clear();
        self.user_answers.clear();
        self.current_index = 0;
        self.score = 0;
        self.error = Some(message);
        self.state = QuizState::Setup;
    }

    fn expect_state(
        &self,
        expected: QuizState,
        action: &'static str,
    ) -> Result<(), QuizSessionError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(QuizSessionError::InvalidTransition {
                action,
                state: self.state,
            })
        }
    }

    #[must_use]
    pub fn state(&self) -> QuizState {
        self.state
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn requested_count(&self) -> u32 {
        self.requested_count
    }

    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn user_answers(&self) -> &[String] {
        &self.user_answers
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        if self.state == QuizState::Active {
            self.questions.get(self.current_index)
        } else {
            None
        }
    }

    /// The answer chosen for the current question, `None` while unanswered.
    #[must_use]
    pub fn current_answer(&self) -> Option<&str> {
        self.user_answers
            .get(self.current_index)
            .map(String::as_str)
            .filter(|answer| !answer.is_empty())
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the generator returned a different number of questions than requested.
    #[must_use]
    pub fn count_mismatch(&self) -> bool {
        !self.questions.is_empty()
            && u32::try_from(self.questions.len()).ok() != Some(self.requested_count)
    }
}
