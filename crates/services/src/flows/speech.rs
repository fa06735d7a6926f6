use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use buddy_core::ValidationError;

use crate::ai::SpeechAudio;

pub(crate) const NAME: &str = "textToSpeech";

/// Used when the speech endpoint reports no content type.
pub const DEFAULT_AUDIO_MIME: &str = "audio/mpeg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextToSpeechInput {
    text: String,
}

impl TextToSpeechInput {
    /// # Errors
    ///
    /// Returns `ValidationError::NothingToSpeak` for blank text.
    pub fn new(text: &str) -> Result<Self, ValidationError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::NothingToSpeak);
        }
        Ok(Self {
            text: trimmed.to_string(),
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextToSpeechOutput {
    /// `data:<mime>;base64,<payload>`
    pub audio: String,
}

pub(crate) fn to_data_uri(audio: &SpeechAudio) -> String {
    let mime = audio
        .content_type
        .as_deref()
        .and_then(|value| value.split(';').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_AUDIO_MIME);
    format!("data:{mime};base64,{}", STANDARD.encode(&audio.bytes))
}
