//! Schema-checked wrappers around single model calls.
//!
//! Each flow renders a prompt from validated input, asks the model for a JSON
//! object, and checks the decoded reply before handing it out. Nothing here
//! retries or caches.

mod answer;
mod quiz;
mod speech;
mod story;
mod summarize;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::ai::ModelClient;
use crate::error::GenerationError;

pub use answer::{AnswerQuestion, AnswerQuestionInput, AnswerQuestionOutput};
pub use quiz::{GenerateQuiz, GenerateQuizInput, GenerateQuizOutput};
pub use speech::{DEFAULT_AUDIO_MIME, TextToSpeechInput, TextToSpeechOutput};
pub use story::{GenerateStory, GenerateStoryInput, GenerateStoryOutput};
pub use summarize::{SummarizeText, SummarizeTextInput, SummarizeTextOutput};

pub trait Flow {
    const NAME: &'static str;
    /// JSON shape the model is told to reply with.
    const OUTPUT_SHAPE: &'static str;

    type Input: Sync;
    type Output: DeserializeOwned + Send;

    fn render_prompt(input: &Self::Input) -> String;

    /// # Errors
    ///
    /// Returns the decoder error when `raw` does not fit `Output`.
    fn decode(raw: &str) -> Result<Self::Output, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Final check on decoded output; the `Err` text explains the mismatch.
    ///
    /// # Errors
    ///
    /// Returns a reason when the output breaks the flow's schema.
    fn check(input: &Self::Input, output: Self::Output) -> Result<Self::Output, String>;
}

/// Runs flows against one model client.
#[derive(Clone)]
pub struct FlowRunner {
    client: Arc<dyn ModelClient>,
}

impl FlowRunner {
    #[must_use]
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.client.enabled()
    }

    /// # Errors
    ///
    /// Returns `GenerationError` when the call fails or the reply breaks the schema.
    pub async fn run<F: Flow>(&self, input: &F::Input) -> Result<F::Output, GenerationError> {
        let prompt = format!(
            "{}\n\nRespond only with a JSON object of this shape: {}",
            F::render_prompt(input),
            F::OUTPUT_SHAPE
        );
        debug!(flow = F::NAME, "running flow");

        let raw = self.client.complete_json(&prompt).await?;
        let output = F::decode(strip_code_fence(&raw))
            .map_err(|e| GenerationError::invalid_output(F::NAME, e))?;
        F::check(input, output).map_err(|reason| GenerationError::invalid_output(F::NAME, reason))
    }

    /// Speech has its own endpoint, so it bypasses [`Self::run`].
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` when the speech call fails.
    pub async fn text_to_speech(
        &self,
        input: &TextToSpeechInput,
    ) -> Result<TextToSpeechOutput, GenerationError> {
        debug!(flow = speech::NAME, chars = input.text().chars().count(), "running flow");
        let audio = self.client.synthesize_speech(input.text()).await?;
        Ok(TextToSpeechOutput {
            audio: speech::to_data_uri(&audio),
        })
    }
}

/// Replaces every `{{name}}` in `template`.
pub(crate) fn render(template: &str, values: &[(&str, &str)]) -> String {
    values.iter().fold(template.to_string(), |text, (name, value)| {
        text.replace(&format!("{{{{{name}}}}}"), value)
    })
}

/// Models sometimes wrap JSON in a Markdown fence despite being asked not to.
pub(crate) fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
    else {
        return trimmed;
    };
    match inner.find('\n') {
        Some(newline) => inner[newline + 1..].trim(),
        None => inner.trim(),
    }
}

pub(crate) fn non_blank(field: &str, value: String) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(format!("`{field}` is empty"))
    } else {
        Ok(trimmed.to_string())
    }
}
