//! Shared error types for the services crate.

use thiserror::Error;

use buddy_core::ValidationError;
use buddy_core::i18n::Translator;
use buddy_core::model::{QuizResultError, QuizSessionError};
use storage::live::PermissionError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

use crate::ai::config::API_KEY_VAR;

/// Errors emitted by the model client and the flows built on it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("the AI service is not configured; set {variable} in your .env file")]
    NotConfigured { variable: &'static str },
    #[error("the AI service returned an empty response")]
    EmptyResponse,
    #[error("the AI service request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("{flow} returned output that does not match its schema: {reason}")]
    InvalidOutput { flow: &'static str, reason: String },
}

impl GenerationError {
    #[must_use]
    pub fn not_configured() -> Self {
        Self::NotConfigured {
            variable: API_KEY_VAR,
        }
    }

    pub(crate) fn invalid_output(flow: &'static str, reason: impl ToString) -> Self {
        Self::InvalidOutput {
            flow,
            reason: reason.to_string(),
        }
    }
}

/// An audio payload that cannot be handed to a player.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlaybackError {
    #[error("audio is not a data URI")]
    NotDataUri,
    #[error("data URI is not audio: {0}")]
    NotAudio(String),
    #[error("audio data URI is not base64 encoded")]
    NotBase64,
    #[error("audio payload is empty or corrupt")]
    InvalidPayload,
}

/// Everything a study action can fail with, as the UI sees it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StudyError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Playback(#[from] PlaybackError),
    #[error(transparent)]
    Permission(PermissionError),
    #[error(transparent)]
    Storage(StorageError),
    #[error(transparent)]
    Quiz(#[from] QuizSessionError),
    #[error(transparent)]
    QuizResult(#[from] QuizResultError),
}

impl From<StorageError> for StudyError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::PermissionDenied(denied) => Self::Permission(denied),
            other => Self::Storage(other),
        }
    }
}

impl From<PermissionError> for StudyError {
    fn from(err: PermissionError) -> Self {
        Self::Permission(err)
    }
}

impl StudyError {
    /// Text to show the user, translated where a catalog entry exists.
    #[must_use]
    pub fn user_message(&self, t: &Translator) -> String {
        match self {
            Self::Validation(err) => t.t(err.message_key()),
            Self::Generation(GenerationError::NotConfigured { .. }) => {
                t.t("The AI service is not configured. Set BUDDY_AI_API_KEY in your .env file.")
            }
            Self::Generation(err) => err.to_string(),
            Self::Playback(_) => t.t("Could not play audio. Your browser might be blocking it."),
            Self::Permission(_) => t.t("You do not have access to this profile."),
            Self::Storage(_) => t.t("Something went wrong. Please try again."),
            Self::Quiz(err) => err.to_string(),
            Self::QuizResult(err) => err.to_string(),
        }
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Study(#[from] StudyError),
}
