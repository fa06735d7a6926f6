//! Runtime settings read from the environment.

use std::env;

use buddy_core::i18n::Language;
use buddy_core::model::UserId;
use tracing::warn;

use crate::ai::AiConfig;

pub const DB_URL_VAR: &str = "BUDDY_DB_URL";
pub const USER_ID_VAR: &str = "BUDDY_USER_ID";
pub const LANGUAGE_VAR: &str = "BUDDY_LANGUAGE";

#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    /// `None` leaves every flow failing with a not-configured error.
    pub ai: Option<AiConfig>,
    /// `None` disables profiles and quiz history.
    pub db_url: Option<String>,
    pub user_id: Option<UserId>,
    pub language: Language,
}

impl AppConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let db_url = env::var(DB_URL_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty());
        let user_id = env::var(USER_ID_VAR)
            .ok()
            .and_then(|raw| UserId::new(raw).ok());
        let language = match env::var(LANGUAGE_VAR) {
            Ok(raw) => raw.parse().unwrap_or_else(|err| {
                warn!(%err, "falling back to English");
                Language::default()
            }),
            Err(_) => Language::default(),
        };
        Self {
            ai: AiConfig::from_env(),
            db_url,
            user_id,
            language,
        }
    }
}
