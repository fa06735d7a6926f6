use std::env;

pub const API_KEY_VAR: &str = "BUDDY_AI_API_KEY";
pub const BASE_URL_VAR: &str = "BUDDY_AI_BASE_URL";
pub const MODEL_VAR: &str = "BUDDY_AI_MODEL";
pub const TTS_MODEL_VAR: &str = "BUDDY_TTS_MODEL";
pub const TTS_VOICE_VAR: &str = "BUDDY_TTS_VOICE";

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TTS_MODEL: &str = "gpt-4o-mini-tts";
const DEFAULT_TTS_VOICE: &str = "alloy";

#[derive(Clone, Debug)]
pub struct AiConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub tts_model: String,
    pub tts_voice: String,
}

impl AiConfig {
    /// Read the model settings from the environment; `None` without an API key.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var(API_KEY_VAR).ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        Some(Self {
            base_url: var_or(BASE_URL_VAR, DEFAULT_BASE_URL),
            api_key,
            model: var_or(MODEL_VAR, DEFAULT_MODEL),
            tts_model: var_or(TTS_MODEL_VAR, DEFAULT_TTS_MODEL),
            tts_voice: var_or(TTS_VOICE_VAR, DEFAULT_TTS_VOICE),
        })
    }

    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.into(),
            tts_model: DEFAULT_TTS_MODEL.into(),
            tts_voice: DEFAULT_TTS_VOICE.into(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
