use std::sync::Arc;

use buddy_core::i18n::{BuiltinCatalog, Catalog, Language, Translator};
use buddy_core::model::{ChatLog, QuizSession, StudyMode};
use dioxus::prelude::*;
use services::{ChatService, FlowRunner, ProfileService, QuizService, SpeechService};

pub trait UiApp: Send + Sync {
    fn initial_language(&self) -> Language;
    fn ai_enabled(&self) -> bool;

    fn flows(&self) -> FlowRunner;
    fn quiz(&self) -> Arc<QuizService>;
    fn chat(&self) -> Arc<ChatService>;
    fn speech(&self) -> Arc<SpeechService>;
    fn profiles(&self) -> Option<Arc<ProfileService>>;
}

#[derive(Clone)]
pub struct AppContext {
    initial_language: Language,
    ai_enabled: bool,
    catalog: Arc<dyn Catalog>,

    flows: FlowRunner,
    quiz: Arc<QuizService>,
    chat: Arc<ChatService>,
    speech: Arc<SpeechService>,
    profiles: Option<Arc<ProfileService>>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            initial_language: app.initial_language(),
            ai_enabled: app.ai_enabled(),
            catalog: Arc::new(BuiltinCatalog::new()),
            flows: app.flows(),
            quiz: app.quiz(),
            chat: app.chat(),
            speech: app.speech(),
            profiles: app.profiles(),
        }
    }

    #[must_use]
    pub fn initial_language(&self) -> Language {
        self.initial_language
    }

    #[must_use]
    pub fn ai_enabled(&self) -> bool {
        self.ai_enabled
    }

    #[must_use]
    pub fn translator(&self, language: Language) -> Translator {
        Translator::new(Arc::clone(&self.catalog), language)
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

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// Colour scheme of the whole window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Class set on the app root; the stylesheet keys its palette off it.
    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Theme::Light => "theme-light",
            Theme::Dark => "theme-dark",
        }
    }
}

/// State shared by the sidebar and the pages. Survives navigation between routes.
#[derive(Clone, Copy)]
pub struct UiState {
    pub language: Signal<Language>,
    pub theme: Signal<Theme>,
    pub mode: Signal<StudyMode>,
    pub chat_log: Signal<ChatLog>,
    pub quiz: Signal<QuizSession>,
}

impl UiState {
    /// Must be called from a component scope.
    #[must_use]
    pub fn new(language: Language, theme: Theme, chat_log: ChatLog, quiz: QuizSession) -> Self {
        Self {
            language: Signal::new(language),
            theme: Signal::new(theme),
            mode: Signal::new(StudyMode::default()),
            chat_log: Signal::new(chat_log),
            quiz: Signal::new(quiz),
        }
    }
}

/// Provide a fresh `UiState` for the current component subtree.
pub fn provide_ui_state(
    language: Language,
    theme: Theme,
    chat_log: ChatLog,
    quiz: QuizSession,
) -> UiState {
    use_context_provider(|| UiState::new(language, theme, chat_log, quiz))
}

#[must_use]
pub fn use_ui_state() -> UiState {
    use_context::<UiState>()
}

/// Translator for the currently selected language; re-renders on language change.
#[must_use]
pub fn use_translator() -> Translator {
    let ctx = use_context::<AppContext>();
    let state = use_ui_state();
    let language = (state.language)();
    ctx.translator(language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_toggles_between_light_and_dark() {
        let theme = Theme::default();
        assert_eq!(theme, Theme::Light);
        assert!(theme.toggled().is_dark());
        assert_eq!(theme.toggled().toggled(), Theme::Light);
        assert_eq!(Theme::Dark.class_name(), "theme-dark");
    }
}
