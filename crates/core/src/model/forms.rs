//! Input constraints shared by every page that submits something to a flow.
//!
//! Lengths are counted in characters after trimming surrounding whitespace.

use crate::error::ValidationError;

pub const MIN_TOPIC_CHARS: usize = 2;
pub const MIN_QUESTION_CHARS: usize = 10;
pub const MIN_QUERY_CHARS: usize = 2;
pub const MIN_SUMMARY_TEXT_CHARS: usize = 100;

pub const MIN_QUIZ_QUESTIONS: u32 = 3;
pub const MAX_QUIZ_QUESTIONS: u32 = 10;
pub const DEFAULT_QUIZ_QUESTIONS: u32 = 5;

/// Counts offered by the quiz setup form.
pub const QUIZ_QUESTION_CHOICES: [u32; 3] = [3, 5, 10];

fn trimmed_with_min(
    raw: &str,
    min_chars: usize,
    err: ValidationError,
) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < min_chars {
        return Err(err);
    }
    Ok(trimmed.to_string())
}

/// # Errors
///
/// Returns `ValidationError::TopicTooShort` when fewer than two characters remain.
pub fn validate_topic(raw: &str) -> Result<String, ValidationError> {
    trimmed_with_min(raw, MIN_TOPIC_CHARS, ValidationError::TopicTooShort)
}

/// # Errors
///
/// Returns `ValidationError::QuestionTooShort` below ten characters.
pub fn validate_question(raw: &str) -> Result<String, ValidationError> {
    trimmed_with_min(raw, MIN_QUESTION_CHARS, ValidationError::QuestionTooShort)
}

/// # Errors
///
/// Returns `ValidationError::QueryTooShort` below two characters.
pub fn validate_query(raw: &str) -> Result<String, ValidationError> {
    trimmed_with_min(raw, MIN_QUERY_CHARS, ValidationError::QueryTooShort)
}

/// # Errors
///
/// Returns `ValidationError::TextTooShort` below one hundred characters.
pub fn validate_summary_text(raw: &str) -> Result<String, ValidationError> {
    trimmed_with_min(raw, MIN_SUMMARY_TEXT_CHARS, ValidationError::TextTooShort)
}

/// # Errors
///
/// Returns `TooFewQuestions` / `TooManyQuestions` outside `[3, 10]`.
pub fn validate_question_count(count: u32) -> Result<u32, ValidationError> {
    if count < MIN_QUIZ_QUESTIONS {
        return Err(ValidationError::TooFewQuestions);
    }
    if count > MAX_QUIZ_QUESTIONS {
        return Err(ValidationError::TooManyQuestions);
    }
    Ok(count)
}

/// A validated "start quiz" submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSetup {
    topic: String,
    question_count: u32,
}

impl QuizSetup {
    /// # Errors
    ///
    /// Returns the first failing constraint, topic first.
    pub fn new(topic: &str, question_count: u32) -> Result<Self, ValidationError> {
        let topic = validate_topic(topic)?;
        let question_count = validate_question_count(question_count)?;
        Ok(Self {
            topic,
            question_count,
        })
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn question_count(&self) -> u32 {
        self.question_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_counts_characters_not_bytes() {
        assert_eq!(validate_topic("日本").unwrap(), "日本");
        assert_eq!(validate_topic(" a "), Err(ValidationError::TopicTooShort));
    }

    #[test]
    fn question_count_bounds_are_inclusive() {
        assert_eq!(validate_question_count(3), Ok(3));
        assert_eq!(validate_question_count(10), Ok(10));
        assert_eq!(
            validate_question_count(2),
            Err(ValidationError::TooFewQuestions)
        );
        assert_eq!(
            validate_question_count(11),
            Err(ValidationError::TooManyQuestions)
        );
    }

    #[test]
    fn setup_reports_topic_before_count() {
        assert_eq!(
            QuizSetup::new("x", 42),
            Err(ValidationError::TopicTooShort)
        );
        let setup = QuizSetup::new("  The Roman Empire ", 5).unwrap();
        assert_eq!(setup.topic(), "The Roman Empire");
        assert_eq!(setup.question_count(), 5);
    }

    #[test]
    fn summary_text_needs_one_hundred_chars() {
        let short = "a".repeat(99);
        let long = "a".repeat(100);
        assert_eq!(
            validate_summary_text(&short),
            Err(ValidationError::TextTooShort)
        );
        assert!(validate_summary_text(&long).is_ok());
        assert!(validate_question("What is ATP?").is_ok());
        assert_eq!(
            validate_question("Why?"),
            Err(ValidationError::QuestionTooShort)
        );
        assert_eq!(validate_query("?"), Err(ValidationError::QueryTooShort));
    }
}
