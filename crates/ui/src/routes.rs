use buddy_core::i18n::Language;
use buddy_core::model::StudyMode;
use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_navigator};

use crate::context::{use_translator, use_ui_state};
use crate::views::{AskView, ChatView, ProfileView, QuizView, StoryView, SummarizerView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", ChatView)] Chat {},
        #[route("/quiz", QuizView)] Quiz {},
        #[route("/summarize", SummarizerView)] Summarizer {},
        #[route("/story", StoryView)] Story {},
        #[route("/ask", AskView)] Ask {},
        #[route("/profile", ProfileView)] Profile {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
pub(crate) fn Sidebar() -> Element {
    let ui = use_ui_state();
    let t = use_translator();
    let navigator = use_navigator();
    let active_mode = (ui.mode)();
    let current_language = (ui.language)();
    let mut mode = ui.mode;
    let mut language = ui.language;
    let mut chat_log = ui.chat_log;
    let mut theme = ui.theme;
    let dark = theme().is_dark();

    rsx! {
        nav { class: "sidebar",
            h1 { {t.t("App Name")} }

            h2 { class: "sidebar-heading", {t.t("Modes")} }
            ul { class: "modes",
                for study_mode in StudyMode::ALL {
                    li {
                        button {
                            class: "{mode_class(study_mode == active_mode)}",
                            r#type: "button",
                            onclick: move |_| {
                                mode.set(study_mode);
                                // Quizzes have their own page; the chat cannot run them.
                                let target = if study_mode == StudyMode::GenerateQuiz {
                                    Route::Quiz {}
                                } else {
                                    Route::Chat {}
                                };
                                navigator.push(target);
                            },
                            {t.t(study_mode.label_key())}
                        }
                    }
                }
            }

            ul { class: "pages",
                li { Link { to: Route::Ask {}, {t.t("Ask a Question")} } }
                li { Link { to: Route::Summarizer {}, {t.t("Summarize Your Text")} } }
                li { Link { to: Route::Story {}, {t.t("AI Story Generator")} } }
                li { Link { to: Route::Profile {}, {t.t("Profile")} } }
            }

            button {
                class: "btn clear-chat",
                r#type: "button",
                onclick: move |_| chat_log.write().clear(),
                {t.t("Clear Chat")}
            }

            h2 { class: "sidebar-heading", {t.t("Configuration")} }
            label { class: "toggle", r#for: "dark-mode",
                input {
                    id: "dark-mode",
                    r#type: "checkbox",
                    checked: dark,
                    onchange: move |_| {
                        let next = theme.peek().toggled();
                        theme.set(next);
                    },
                }
                span { {t.t("Dark Mode")} }
            }
            label { r#for: "language", {t.t("Language")} }
            select {
                id: "language",
                "aria-label": t.t("Select language"),
                onchange: move |evt| {
                    if let Ok(selected) = evt.value().parse::<Language>() {
                        language.set(selected);
                    }
                },
                for option_language in Language::ALL {
                    option {
                        value: "{option_language}",
                        selected: option_language == current_language,
                        "{option_language}"
                    }
                }
            }
        }
    }
}

fn mode_class(active: bool) -> &'static str {
    if active { "mode active" } else { "mode" }
}
