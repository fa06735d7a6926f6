use buddy_core::ValidationError;
use buddy_core::model::{validate_question, validate_topic};
use serde::Deserialize;

use super::{Flow, non_blank, render};

const PROMPT: &str = "You are an AI study buddy helping a student learn about {{topic}}. \
Please answer the following question clearly and concisely:\n\nQuestion: {{question}}";

/// Explains a topic by answering one question about it.
pub struct AnswerQuestion;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerQuestionInput {
    topic: String,
    question: String,
}

impl AnswerQuestionInput {
    /// # Errors
    ///
    /// Returns `ValidationError` for a topic under 2 or a question under 10 characters.
    pub fn new(topic: &str, question: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            topic: validate_topic(topic)?,
            question: validate_question(question)?,
        })
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnswerQuestionOutput {
    pub answer: String,
}

impl Flow for AnswerQuestion {
    const NAME: &'static str = "answerQuestion";
    const OUTPUT_SHAPE: &'static str = r#"{"answer": string}"#;

    type Input = AnswerQuestionInput;
    type Output = AnswerQuestionOutput;

    fn render_prompt(input: &Self::Input) -> String {
        render(
            PROMPT,
            &[("topic", input.topic()), ("question", input.question())],
        )
    }

    fn check(_input: &Self::Input, output: Self::Output) -> Result<Self::Output, String> {
        Ok(AnswerQuestionOutput {
            answer: non_blank("answer", output.answer)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_is_validated_and_trimmed() {
        let input = AnswerQuestionInput::new("  Biology ", "What is osmosis exactly?").unwrap();
        assert_eq!(input.topic(), "Biology");
        assert_eq!(
            AnswerQuestionInput::new("B", "What is osmosis exactly?"),
            Err(ValidationError::TopicTooShort)
        );
        assert_eq!(
            AnswerQuestionInput::new("Biology", "Osmosis?"),
            Err(ValidationError::QuestionTooShort)
        );
    }

    #[test]
    fn prompt_names_topic_and_question() {
        let input = AnswerQuestionInput::new("Biology", "What is osmosis exactly?").unwrap();
        let prompt = AnswerQuestion::render_prompt(&input);
        assert!(prompt.starts_with(
            "You are an AI study buddy helping a student learn about Biology."
        ));
        assert!(prompt.ends_with("Question: What is osmosis exactly?"));
    }

    #[test]
    fn blank_answer_is_rejected() {
        let input = AnswerQuestionInput::new("Biology", "What is osmosis exactly?").unwrap();
        let output = AnswerQuestionOutput {
            answer: "   ".into(),
        };
        assert!(AnswerQuestion::check(&input, output).is_err());
    }
}
