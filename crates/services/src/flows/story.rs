use buddy_core::ValidationError;
use buddy_core::model::validate_topic;
use serde::Deserialize;

use super::{Flow, non_blank, render};

const PROMPT: &str = "You are a futuristic, creative AI storyteller. Write a short, imaginative \
story about {{topic}}. Make it captivating and unique.";

pub struct GenerateStory;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateStoryInput {
    topic: String,
}

impl GenerateStoryInput {
    /// # Errors
    ///
    /// Returns `ValidationError::TopicTooShort` for a topic under 2 characters.
    pub fn new(topic: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            topic: validate_topic(topic)?,
        })
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerateStoryOutput {
    pub story: String,
}

impl Flow for GenerateStory {
    const NAME: &'static str = "generateStory";
    const OUTPUT_SHAPE: &'static str = r#"{"story": string}"#;

    type Input = GenerateStoryInput;
    type Output = GenerateStoryOutput;

    fn render_prompt(input: &Self::Input) -> String {
        render(PROMPT, &[("topic", input.topic())])
    }

    fn check(_input: &Self::Input, output: Self::Output) -> Result<Self::Output, String> {
        Ok(GenerateStoryOutput {
            story: non_blank("story", output.story)?,
        })
    }
}
