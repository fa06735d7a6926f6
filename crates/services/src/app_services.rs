use std::sync::Arc;

use buddy_core::model::ProfileUpdate;
use storage::live::LiveStore;
use storage::repository::Storage;
use tracing::info;

use crate::Clock;
use crate::ai::{ModelClient, OpenAiClient};
use crate::chat_service::ChatService;
use crate::config::AppConfig;
use crate::error::AppServicesError;
use crate::flows::FlowRunner;
use crate::profile_service::ProfileService;
use crate::quiz_service::QuizService;
use crate::speech_service::SpeechService;

/// Assembles app-facing services around one model client and an optional profile store.
#[derive(Clone)]
pub struct AppServices {
    flows: FlowRunner,
    quiz: Arc<QuizService>,
    chat: Arc<ChatService>,
    speech: Arc<SpeechService>,
    profiles: Option<Arc<ProfileService>>,
}

impl AppServices {
    /// Build services from configuration, opening `SQLite` when a URL is set
    /// and signing in the configured user.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or sign-in fails.
    pub async fn from_config(config: &AppConfig, clock: Clock) -> Result<Self, AppServicesError> {
        let client: Arc<dyn ModelClient> = Arc::new(OpenAiClient::new(config.ai.clone()));
        let storage = match config.db_url.as_deref() {
            Some(url) => Some(Storage::sqlite(url).await?),
            None => {
                info!("no profile store configured; quiz history is off");
                None
            }
        };
        let services = Self::new(client, storage, clock);

        if let (Some(profiles), Some(user_id)) = (services.profiles(), config.user_id.clone()) {
            profiles.sign_in(user_id, ProfileUpdate::default()).await?;
        }
        Ok(services)
    }

    #[must_use]
    pub fn new(client: Arc<dyn ModelClient>, storage: Option<Storage>, clock: Clock) -> Self {
        let flows = FlowRunner::new(client);
        let profiles =
            storage.map(|storage| Arc::new(ProfileService::new(clock, LiveStore::new(storage))));
        let quiz = Arc::new(QuizService::new(flows.clone(), profiles.clone()));
        let chat = Arc::new(ChatService::new(flows.clone()));
        let speech = Arc::new(SpeechService::new(flows.clone()));

        Self {
            flows,
            quiz,
            chat,
            speech,
            profiles,
        }
    }

    #[must_use]
    pub fn ai_enabled(&self) -> bool {
        self.flows.enabled()
    }

    #[must_use]
    pub fn flows(&self) -> FlowRunner {
        self.flows.clone()
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn chat(&self) -> Arc<ChatService> {
        Arc::clone(&self.chat)
    }

    #[must_use]
    pub fn speech(&self) -> Arc<SpeechService> {
        Arc::clone(&self.speech)
    }

    #[must_use]
    pub fn profiles(&self) -> Option<Arc<ProfileService>> {
        self.profiles.clone()
    }
}
