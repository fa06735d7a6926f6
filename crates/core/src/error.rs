use thiserror::Error;

/// Local form constraint failures.
///
/// The display text doubles as the translation key, so views can pass
/// `message_key()` straight to the translator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("Topic must be at least 2 characters.")]
    TopicTooShort,

    #[error("Question must be at least 10 characters.")]
    QuestionTooShort,

    #[error("Query must be at least 2 characters.")]
    QueryTooShort,

    #[error("Text must be at least 100 characters to summarize.")]
    TextTooShort,

    #[error("Must have at least 3 questions.")]
    TooFewQuestions,

    #[error("Cannot have more than 10 questions.")]
    TooManyQuestions,

    #[error("There is no text to read aloud.")]
    NothingToSpeak,

    #[error("Use the quiz page to generate a quiz.")]
    QuizModeInChat,

    #[error("User id cannot be empty.")]
    EmptyUserId,

    #[error("Photo URL is not a valid URL.")]
    InvalidPhotoUrl,
}

impl ValidationError {
    /// English text of the error, usable as a catalog key.
    #[must_use]
    pub fn message_key(&self) -> &'static str {
        match self {
            Self::TopicTooShort => "Topic must be at least 2 characters.",
            Self::QuestionTooShort => "Question must be at least 10 characters.",
            Self::QueryTooShort => "Query must be at least 2 characters.",
            Self::TextTooShort => "Text must be at least 100 characters to summarize.",
            Self::TooFewQuestions => "Must have at least 3 questions.",
            Self::TooManyQuestions => "Cannot have more than 10 questions.",
            Self::NothingToSpeak => "There is no text to read aloud.",
            Self::QuizModeInChat => "Use the quiz page to generate a quiz.",
            Self::EmptyUserId => "User id cannot be empty.",
            Self::InvalidPhotoUrl => "Photo URL is not a valid URL.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_key_matches_display() {
        let errors = [
            ValidationError::TopicTooShort,
            ValidationError::QuestionTooShort,
            ValidationError::QueryTooShort,
            ValidationError::TextTooShort,
            ValidationError::TooFewQuestions,
            ValidationError::TooManyQuestions,
            ValidationError::NothingToSpeak,
            ValidationError::QuizModeInChat,
            ValidationError::EmptyUserId,
            ValidationError::InvalidPhotoUrl,
        ];
        for err in errors {
            assert_eq!(err.to_string(), err.message_key());
        }
    }
}
