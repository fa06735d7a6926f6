use buddy_core::ValidationError;
use buddy_core::model::{QuizQuestion, QuizSetup};
use serde::Deserialize;
use tracing::warn;

use super::{Flow, render};

const PROMPT: &str = r#"You are an expert quiz generator. Generate a quiz with {{numQuestions}} questions on the topic of {{topic}}.

The quiz should be returned as a JSON array of objects. Each object should have the following keys:
- question: The quiz question.
- options: An array of possible answer options.
- answer: The correct answer to the question. This MUST be one of the options given.

Here's an example of what the output should look like:

[
  {
    "question": "What is the capital of France?",
    "options": ["London", "Paris", "Berlin", "Rome"],
    "answer": "Paris"
  },
  {
    "question": "What is the highest mountain in the world?",
    "options": ["Mount Everest", "K2", "Kangchenjunga", "Lhotse"],
    "answer": "Mount Everest"
  }
]

Make sure each question is unique and tests the user's knowledge of the topic.  Do not use questions from this example.  The options should be plausible, and there should be 4 options per question.

Ensure that the output can be parsed as valid JSON.

{{topic}}"#;

/// Generates multiple-choice practice questions.
pub struct GenerateQuiz;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateQuizInput {
    topic: String,
    num_questions: u32,
}

impl GenerateQuizInput {
    /// # Errors
    ///
    /// Returns `ValidationError` for a short topic or a count outside 3..=10.
    pub fn new(topic: &str, num_questions: u32) -> Result<Self, ValidationError> {
        Ok(Self::from(&QuizSetup::new(topic, num_questions)?))
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn num_questions(&self) -> u32 {
        self.num_questions
    }
}

impl From<&QuizSetup> for GenerateQuizInput {
    fn from(setup: &QuizSetup) -> Self {
        Self {
            topic: setup.topic().to_string(),
            num_questions: setup.question_count(),
        }
    }
}

/// Every question has already passed `QuizQuestion` validation on decode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerateQuizOutput {
    pub quiz: Vec<QuizQuestion>,
}

impl Flow for GenerateQuiz {
    const NAME: &'static str = "generateQuiz";
    const OUTPUT_SHAPE: &'static str = r#"{"quiz": [{"question": string, "options": [string, string, string, string], "answer": string}]}"#;

    type Input = GenerateQuizInput;
    type Output = GenerateQuizOutput;

    fn render_prompt(input: &Self::Input) -> String {
        let count = input.num_questions().to_string();
        render(
            PROMPT,
            &[("numQuestions", count.as_str()), ("topic", input.topic())],
        )
    }

    /// Accepts the wrapped object or, as the prompt text suggests, a bare array.
    fn decode(raw: &str) -> Result<Self::Output, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        if value.is_array() {
            Ok(GenerateQuizOutput {
                quiz: serde_json::from_value(value)?,
            })
        } else {
            serde_json::from_value(value)
        }
    }

    fn check(input: &Self::Input, output: Self::Output) -> Result<Self::Output, String> {
        if output.quiz.is_empty() {
            return Err("quiz contains no questions".into());
        }
        let received = output.quiz.len();
        if usize::try_from(input.num_questions()).ok() != Some(received) {
            warn!(
                requested = input.num_questions(),
                received,
                topic = %input.topic(),
                "quiz question count differs from request"
            );
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> GenerateQuizInput {
        GenerateQuizInput::new("Arithmetic", 3).unwrap()
    }

    #[test]
    fn prompt_carries_count_and_topic() {
        let prompt = GenerateQuiz::render_prompt(&input());
        assert!(prompt.starts_with(
            "You are an expert quiz generator. Generate a quiz with 3 questions on the topic of Arithmetic."
        ));
        assert!(prompt.ends_with("\n\nArithmetic"));
    }

    #[test]
    fn decodes_wrapped_and_bare_arrays() {
        let item = r#"{"question":"2+2?","options":["3","4","5","6"],"answer":"4"}"#;
        let wrapped = GenerateQuiz::decode(&format!(r#"{{"quiz":[{item}]}}"#)).unwrap();
        let bare = GenerateQuiz::decode(&format!("[{item}]")).unwrap();
        assert_eq!(wrapped, bare);
        assert_eq!(wrapped.quiz[0].answer(), "4");
    }

    #[test]
    fn decode_rejects_bad_questions() {
        let three_options = r#"{"quiz":[{"question":"2+2?","options":["3","4","5"],"answer":"4"}]}"#;
        assert!(GenerateQuiz::decode(three_options).is_err());

        let stray_answer =
            r#"{"quiz":[{"question":"2+2?","options":["3","4","5","6"],"answer":"22"}]}"#;
        assert!(GenerateQuiz::decode(stray_answer).is_err());

        let missing_field = r#"{"quiz":[{"question":"2+2?","options":["3","4","5","6"]}]}"#;
        assert!(GenerateQuiz::decode(missing_field).is_err());

        assert!(GenerateQuiz::decode("not json").is_err());
    }

    #[test]
    fn empty_quiz_fails_check_but_short_quiz_passes() {
        let empty = GenerateQuizOutput { quiz: Vec::new() };
        assert!(GenerateQuiz::check(&input(), empty).is_err());

        let one = GenerateQuizOutput {
            quiz: vec![
                QuizQuestion::new(
                    "2+2?",
                    vec!["3".into(), "4".into(), "5".into(), "6".into()],
                    "4",
                )
                .unwrap(),
            ],
        };
        assert_eq!(GenerateQuiz::check(&input(), one).unwrap().quiz.len(), 1);
    }
}
