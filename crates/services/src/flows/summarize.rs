use buddy_core::ValidationError;
use buddy_core::model::validate_summary_text;
use serde::Deserialize;

use super::{Flow, non_blank, render};

const PROMPT: &str = "You are an AI study buddy helping a student review material. Summarize \
the following text into a short, easy-to-read summary of its key points:\n\nText: {{text}}";

pub struct SummarizeText;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizeTextInput {
    text: String,
}

impl SummarizeTextInput {
    /// # Errors
    ///
    /// Returns `ValidationError::TextTooShort` below 100 characters.
    pub fn new(text: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            text: validate_summary_text(text)?,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SummarizeTextOutput {
    pub summary: String,
}

impl Flow for SummarizeText {
    const NAME: &'static str = "summarizeText";
    const OUTPUT_SHAPE: &'static str = r#"{"summary": string}"#;

    type Input = SummarizeTextInput;
    type Output = SummarizeTextOutput;

    fn render_prompt(input: &Self::Input) -> String {
        render(PROMPT, &[("text", input.text())])
    }

    fn check(_input: &Self::Input, output: Self::Output) -> Result<Self::Output, String> {
        Ok(SummarizeTextOutput {
            summary: non_blank("summary", output.summary)?,
        })
    }
}
