use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{PlaybackError, StudyError};
use crate::flows::{FlowRunner, TextToSpeechInput};

/// A playable `data:audio/*;base64,...` clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    data_uri: String,
    mime: String,
}

impl AudioClip {
    /// # Errors
    ///
    /// Returns `PlaybackError` unless `data_uri` is a non-empty base64 audio data URI.
    pub fn parse(data_uri: &str) -> Result<Self, PlaybackError> {
        let rest = data_uri
            .trim()
            .strip_prefix("data:")
            .ok_or(PlaybackError::NotDataUri)?;
        let (header, payload) = rest.split_once(',').ok_or(PlaybackError::NotDataUri)?;
        let (mime, encoding) = header.rsplit_once(';').ok_or(PlaybackError::NotBase64)?;
        if encoding != "base64" {
            return Err(PlaybackError::NotBase64);
        }
        let mime = mime.split(';').next().unwrap_or(mime).trim();
        if !mime.starts_with("audio/") {
            return Err(PlaybackError::NotAudio(mime.to_string()));
        }
        let decoded = STANDARD
            .decode(payload)
            .map_err(|_| PlaybackError::InvalidPayload)?;
        if decoded.is_empty() {
            return Err(PlaybackError::InvalidPayload);
        }
        Ok(Self {
            data_uri: data_uri.trim().to_string(),
            mime: mime.to_string(),
        })
    }

    #[must_use]
    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    #[must_use]
    pub fn mime(&self) -> &str {
        &self.mime
    }
}

#[derive(Clone)]
pub struct SpeechService {
    runner: FlowRunner,
}

impl SpeechService {
    #[must_use]
    pub fn new(runner: FlowRunner) -> Self {
        Self { runner }
    }

    /// # Errors
    ///
    /// Returns `StudyError::Validation` for blank text, `StudyError::Generation`
    /// when the speech call fails, and `StudyError::Playback` for unplayable audio.
    pub async fn speak(&self, text: &str) -> Result<AudioClip, StudyError> {
        let input = TextToSpeechInput::new(text)?;
        let output = self.runner.text_to_speech(&input).await?;
        Ok(AudioClip::parse(&output.audio)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_audio_data_uris() {
        let clip = AudioClip::parse("data:audio/wav;base64,UklGRg==").unwrap();
        assert_eq!(clip.mime(), "audio/wav");
        assert_eq!(clip.data_uri(), "data:audio/wav;base64,UklGRg==");

        let with_params = AudioClip::parse("data:audio/ogg;codecs=opus;base64,T2dnUw==").unwrap();
        assert_eq!(with_params.mime(), "audio/ogg");
    }

    #[test]
    fn rejects_anything_unplayable() {
        assert_eq!(
            AudioClip::parse("https://example.com/a.mp3"),
            Err(PlaybackError::NotDataUri)
        );
        assert_eq!(
            AudioClip::parse("data:image/png;base64,iVBORw=="),
            Err(PlaybackError::NotAudio("image/png".into()))
        );
        assert_eq!(
            AudioClip::parse("data:audio/mpeg,plain"),
            Err(PlaybackError::NotBase64)
        );
        assert_eq!(
            AudioClip::parse("data:audio/mpeg;base64,@@@"),
            Err(PlaybackError::InvalidPayload)
        );
        assert_eq!(
            AudioClip::parse("data:audio/mpeg;base64,"),
            Err(PlaybackError::InvalidPayload)
        );
    }
}
