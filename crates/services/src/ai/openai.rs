use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::AiConfig;
use super::{ModelClient, SpeechAudio};
use crate::error::GenerationError;

/// Client for OpenAI-compatible chat completion and speech endpoints.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    config: Option<AiConfig>,
}

impl OpenAiClient {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(AiConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<AiConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn config(&self) -> Result<&AiConfig, GenerationError> {
        self.config.as_ref().ok_or_else(GenerationError::not_configured)
    }
}

#[async_trait]
impl ModelClient for OpenAiClient {
    async fn complete_json(&self, prompt: &str) -> Result<String, GenerationError> {
        let config = self.config()?;

        let payload = ChatRequest {
            model: config.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt.to_string(),
            }],
            temperature: 0.7,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };
        debug!(model = %config.model, prompt_chars = prompt.len(), "chat completion request");

        let response = self
            .client
            .post(config.endpoint("chat/completions"))
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GenerationError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(GenerationError::EmptyResponse)?;

        Ok(content.trim().to_string())
    }

    async fn synthesize_speech(&self, text: &str) -> Result<SpeechAudio, GenerationError> {
        let config = self.config()?;

        let payload = SpeechRequest {
            model: &config.tts_model,
            voice: &config.tts_voice,
            input: text,
        };
        debug!(model = %config.tts_model, voice = %config.tts_voice, "speech request");

        let response = self
            .client
            .post(config.endpoint("audio/speech"))
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GenerationError::HttpStatus(response.status()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        Ok(SpeechAudio {
            bytes: bytes.to_vec(),
            content_type,
        })
    }

    fn enabled(&self) -> bool {
        self.config.is_some()
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}
