use std::sync::Arc;

use async_trait::async_trait;
use buddy_core::i18n::Language;
use buddy_core::model::{ChatLog, QuizSession};
use buddy_core::time::fixed_clock;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{
    AppServices, ChatService, FlowRunner, GenerationError, ModelClient, ProfileService,
    QuizService, SpeechAudio, SpeechService,
};
use storage::repository::Storage;

use crate::context::{Theme, UiApp, build_app_context, provide_ui_state};
use crate::routes::Route;
use crate::views::{AskView, ChatView, ProfileView, QuizView, StoryView, SummarizerView};

/// Replies with an empty object; views under test never reach the model.
struct IdleModel {
    enabled: bool,
}

#[async_trait]
impl ModelClient for IdleModel {
    async fn complete_json(&self, _prompt: &str) -> Result<String, GenerationError> {
        Ok("{}".to_string())
    }

    async fn synthesize_speech(&self, _text: &str) -> Result<SpeechAudio, GenerationError> {
        Ok(SpeechAudio {
            bytes: b"ID3".to_vec(),
            content_type: None,
        })
    }

    fn enabled(&self) -> bool {
        self.enabled
    }
}

struct TestApp {
    services: AppServices,
    language: Language,
}

impl UiApp for TestApp {
    fn initial_language(&self) -> Language {
        self.language
    }

    fn ai_enabled(&self) -> bool {
        self.services.ai_enabled()
    }

    fn flows(&self) -> FlowRunner {
        self.services.flows()
    }

    fn quiz(&self) -> Arc<QuizService> {
        self.services.quiz()
    }

    fn chat(&self) -> Arc<ChatService> {
        self.services.chat()
    }

    fn speech(&self) -> Arc<SpeechService> {
        self.services.speech()
    }

    fn profiles(&self) -> Option<Arc<ProfileService>> {
        self.services.profiles()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    Chat,
    Quiz,
    Summarizer,
    Story,
    Ask,
    Profile,
    /// The real route tree: sidebar layout around the chat page.
    Shell,
}

/// Knobs for a harness; `Default` is English, AI on, no profile store.
#[derive(Clone)]
pub struct HarnessOptions {
    pub language: Language,
    pub theme: Theme,
    pub ai_enabled: bool,
    pub storage: Option<Storage>,
    pub chat_log: ChatLog,
    pub quiz: QuizSession,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            language: Language::English,
            theme: Theme::default(),
            ai_enabled: true,
            storage: None,
            chat_log: ChatLog::new(),
            quiz: QuizSession::new(),
        }
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    theme: Theme,
    chat_log: ChatLog,
    quiz: QuizSession,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let language = props.app.language;
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    provide_ui_state(
        language,
        props.theme,
        props.chat_log.clone(),
        props.quiz.clone(),
    );
    if props.view == ViewKind::Shell {
        return rsx! { Router::<Route> {} };
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Chat => rsx! { ChatView {} },
        ViewKind::Quiz => rsx! { QuizView {} },
        ViewKind::Summarizer => rsx! { SummarizerView {} },
        ViewKind::Story => rsx! { StoryView {} },
        ViewKind::Ask => rsx! { AskView {} },
        ViewKind::Profile => rsx! { ProfileView {} },
        ViewKind::Shell => rsx! {},
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: AppServices,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with(view, HarnessOptions::default())
}

pub fn setup_view_harness_with(view: ViewKind, options: HarnessOptions) -> ViewHarness {
    let model = Arc::new(IdleModel {
        enabled: options.ai_enabled,
    });
    let services = AppServices::new(model, options.storage, fixed_clock());
    let app = Arc::new(TestApp {
        services: services.clone(),
        language: options.language,
    });

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            theme: options.theme,
            chat_log: options.chat_log,
            quiz: options.quiz,
        },
    );

    ViewHarness { dom, services }
}
