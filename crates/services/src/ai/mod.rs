//! Access to the remote language model.

pub mod config;
pub mod openai;

use async_trait::async_trait;

use crate::error::GenerationError;

pub use config::AiConfig;
pub use openai::OpenAiClient;

/// Raw audio returned by the speech endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechAudio {
    pub bytes: Vec<u8>,
    /// Content type reported by the server, if any.
    pub content_type: Option<String>,
}

/// One request/response exchange with the model backend.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send a prompt and return the model's reply, which should be a JSON object.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` when the backend is unconfigured, unreachable,
    /// or replies with nothing.
    async fn complete_json(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Turn text into speech.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` when the backend is unconfigured, unreachable,
    /// or replies with no audio.
    async fn synthesize_speech(&self, text: &str) -> Result<SpeechAudio, GenerationError>;

    fn enabled(&self) -> bool;
}
