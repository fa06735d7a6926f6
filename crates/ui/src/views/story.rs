use dioxus::prelude::*;
use services::flows::{GenerateStory, GenerateStoryInput};
use services::{AudioClip, StudyError};

use crate::context::{AppContext, use_translator, use_ui_state};
use crate::views::components::{AudioPlayer, ErrorCard, PageHeader, RichText};
use crate::views::{ViewError, ViewState};
use crate::vm::markdown_to_html;

#[derive(Clone, Debug, PartialEq)]
struct StoryData {
    text: String,
    html: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
enum Speech {
    #[default]
    Idle,
    Loading,
    Playing(AudioClip),
}

#[component]
pub fn StoryView() -> Element {
    let ctx = use_context::<AppContext>();
    let ui = use_ui_state();
    let t = use_translator();

    let mut topic = use_signal(String::new);
    let mut form_error = use_signal(|| None::<String>);
    let mut story = use_signal(|| ViewState::<StoryData>::Idle);
    let mut speech = use_signal(Speech::default);
    // (title, message)
    let mut speech_error = use_signal(|| None::<(String, String)>);

    let on_submit = {
        let ctx = ctx.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            if story.peek().is_loading() {
                return;
            }
            let t = ctx.translator(*ui.language.peek());
            let input = match GenerateStoryInput::new(&topic.peek()) {
                Ok(input) => input,
                Err(err) => {
                    form_error.set(Some(t.t(err.message_key())));
                    return;
                }
            };
            form_error.set(None);
            speech.set(Speech::Idle);
            speech_error.set(None);
            story.set(ViewState::Loading);

            let flows = ctx.flows();
            spawn(async move {
                let mut story = story;
                let result = flows
                    .run::<GenerateStory>(&input)
                    .await
                    .map(|output| StoryData {
                        html: markdown_to_html(&output.story),
                        text: output.story,
                    })
                    .map_err(|err| ViewError::from_study(&StudyError::from(err), &t));
                story.set(result.into());
            });
        }
    };

    let on_read_aloud = move |_: MouseEvent| {
        if *speech.peek() != Speech::Idle {
            speech.set(Speech::Idle);
            return;
        }
        let text = match &*story.peek() {
            ViewState::Ready(data) => data.text.clone(),
            _ => return,
        };
        let t = ctx.translator(*ui.language.peek());
        speech_error.set(None);
        speech.set(Speech::Loading);

        let service = ctx.speech();
        spawn(async move {
            let mut speech = speech;
            match service.speak(&text).await {
                Ok(clip) => {
                    if *speech.peek() == Speech::Loading {
                        speech.set(Speech::Playing(clip));
                    }
                }
                Err(err) => {
                    speech.set(Speech::Idle);
                    speech_error.set(Some((
                        t.t("Text-to-Speech Error"),
                        err.user_message(&t),
                    )));
                }
            }
        });
    };

    let audio_failed = {
        let t = t.clone();
        move |()| {
            speech.set(Speech::Idle);
            speech_error.set(Some((
                t.t("Audio Error"),
                t.t("Could not play audio. Your browser might be blocking it."),
            )));
        }
    };

    let loading = story.read().is_loading();
    let read_aloud_label = match speech() {
        Speech::Idle => t.t("Read Aloud"),
        Speech::Loading => t.t("Loading..."),
        Speech::Playing(_) => t.t("Stop"),
    };

    rsx! {
        div { class: "page story-page",
            PageHeader {
                title: t.t("AI Story Generator"),
                description: t.t("Unleash your imagination. Provide a topic, and our AI will weave a unique story for you."),
            }

            form { class: "card", onsubmit: on_submit,
                label { r#for: "story-topic", {t.t("Story Topic")} }
                input {
                    id: "story-topic",
                    r#type: "text",
                    value: "{topic}",
                    placeholder: t.t("e.g., A robot who discovers music"),
                    oninput: move |evt| topic.set(evt.value()),
                }
                if let Some(message) = form_error() {
                    p { class: "form-error", "{message}" }
                }
                button { class: "btn primary", r#type: "submit", disabled: loading,
                    if loading {
                        {t.t("Generating Story...")}
                    } else {
                        {t.t("Generate Story")}
                    }
                }
            }

            match story() {
                ViewState::Idle | ViewState::Loading => rsx! {},
                ViewState::Ready(data) => rsx! {
                    section { class: "card result-card",
                        header { class: "result-header",
                            h3 { {t.t("The Story")} }
                            button { class: "btn", r#type: "button", onclick: on_read_aloud,
                                "{read_aloud_label}"
                            }
                        }
                        RichText { html: data.html }
                    }
                },
                ViewState::Error(err) => rsx! {
                    ErrorCard { title: t.t("Story Generation Error"), message: err.message(&t) }
                },
            }

            if let Speech::Playing(clip) = speech() {
                AudioPlayer {
                    clip,
                    on_finished: move |()| speech.set(Speech::Idle),
                    on_failed: audio_failed,
                }
            }
            if let Some((title, message)) = speech_error() {
                ErrorCard { title, message }
            }
        }
    }
}
