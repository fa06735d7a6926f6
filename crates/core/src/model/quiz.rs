use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every generated question carries exactly this many options.
pub const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizQuestionError {
    #[error("question text is empty")]
    EmptyQuestion,

    #[error("expected {expected} options, found {found}")]
    OptionCount { expected: usize, found: usize },

    #[error("option {index} is empty")]
    EmptyOption { index: usize },

    #[error("answer {answer:?} is not one of the options")]
    AnswerNotInOptions { answer: String },
}

/// One multiple-choice question whose answer is guaranteed to be an option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQuizQuestion")]
pub struct QuizQuestion {
    question: String,
    options: Vec<String>,
    answer: String,
}

#[derive(Deserialize)]
struct RawQuizQuestion {
    question: String,
    options: Vec<String>,
    answer: String,
}

impl TryFrom<RawQuizQuestion> for QuizQuestion {
    type Error = QuizQuestionError;

    fn try_from(raw: RawQuizQuestion) -> Result<Self, Self::Error> {
        Self::new(raw.question, raw.options, raw.answer)
    }
}

impl QuizQuestion {
    /// Builds a question, trimming every field.
    ///
    /// # Errors
    ///
    /// Returns `QuizQuestionError` when the text or an option is blank, the
    /// option count is not four, or the answer matches no option.
    pub fn new(
        question: impl Into<String>,
        options: Vec<String>,
        answer: impl Into<String>,
    ) -> Result<Self, QuizQuestionError> {
        let question = question.into().trim().to_string();
        if question.is_empty() {
            return Err(QuizQuestionError::EmptyQuestion);
        }

        if options.len() != OPTIONS_PER_QUESTION {
            return Err(QuizQuestionError::OptionCount {
                expected: OPTIONS_PER_QUESTION,
                found: options.len(),
            });
        }
        let options = options
            .into_iter()
            .enumerate()
            .map(|(index, option)| {
                let option = option.trim().to_string();
                if option.is_empty() {
                    Err(QuizQuestionError::EmptyOption { index })
                } else {
                    Ok(option)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let answer = answer.into().trim().to_string();
        if !options.iter().any(|option| *option == answer) {
            return Err(QuizQuestionError::AnswerNotInOptions { answer });
        }

        Ok(Self {
            question,
            options,
            answer,
        })
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn is_correct(&self, submitted: &str) -> bool {
        self.answer == submitted
    }
}

/// Number of positions where the submitted answer equals the key.
///
/// Missing submissions count as wrong.
#[must_use]
pub fn score_answers(questions: &[QuizQuestion], answers: &[String]) -> u32 {
    let correct = questions
        .iter()
        .zip(answers)
        .filter(|(question, answer)| question.is_correct(answer))
        .count();
    u32::try_from(correct).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| (*item).to_string()).collect()
    }

    #[test]
    fn rejects_answer_outside_options() {
        let err = QuizQuestion::new("2+2?", options(&["3", "4", "5", "6"]), "22").unwrap_err();
        assert_eq!(
            err,
            QuizQuestionError::AnswerNotInOptions {
                answer: "22".into()
            }
        );
    }

    #[test]
    fn rejects_wrong_option_count() {
        let err = QuizQuestion::new("2+2?", options(&["3", "4"]), "4").unwrap_err();
        assert_eq!(
            err,
            QuizQuestionError::OptionCount {
                expected: 4,
                found: 2
            }
        );
    }

    #[test]
    fn deserializing_validates() {
        let ok: QuizQuestion = serde_json::from_str(
            r#"{"question":"Capital of France?","options":["London","Paris","Berlin","Rome"],"answer":"Paris"}"#,
        )
        .unwrap();
        assert_eq!(ok.answer(), "Paris");

        let bad: Result<QuizQuestion, _> = serde_json::from_str(
            r#"{"question":"Capital of France?","options":["London","Paris","Berlin","Rome"],"answer":"Lyon"}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn scores_single_question_example() {
        let questions =
            vec![QuizQuestion::new("2+2?", options(&["3", "4", "5", "6"]), "4").unwrap()];
        assert_eq!(score_answers(&questions, &["4".to_string()]), 1);
        assert_eq!(score_answers(&questions, &[String::new()]), 0);
        assert_eq!(score_answers(&questions, &[]), 0);
    }
}
