use dioxus::prelude::*;
use services::StudyError;
use services::flows::{AnswerQuestion, AnswerQuestionInput};

use crate::context::{AppContext, use_translator, use_ui_state};
use crate::views::components::{ErrorCard, PageHeader, RichText};
use crate::views::{ViewError, ViewState};
use crate::vm::markdown_to_html;

#[component]
pub fn AskView() -> Element {
    let ctx = use_context::<AppContext>();
    let ui = use_ui_state();
    let t = use_translator();

    let mut topic = use_signal(String::new);
    let mut question = use_signal(String::new);
    let mut form_error = use_signal(|| None::<String>);
    let mut answer = use_signal(|| ViewState::<String>::Idle);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if answer.peek().is_loading() {
            return;
        }
        let t = ctx.translator(*ui.language.peek());
        let input = match AnswerQuestionInput::new(&topic.peek(), &question.peek()) {
            Ok(input) => input,
            Err(err) => {
                form_error.set(Some(t.t(err.message_key())));
                return;
            }
        };
        form_error.set(None);
        answer.set(ViewState::Loading);

        let flows = ctx.flows();
        spawn(async move {
            let mut answer = answer;
            let result = flows
                .run::<AnswerQuestion>(&input)
                .await
                .map(|output| markdown_to_html(&output.answer))
                .map_err(|err| ViewError::from_study(&StudyError::from(err), &t));
            answer.set(result.into());
        });
    };

    let loading = answer.read().is_loading();

    rsx! {
        div { class: "page ask-page",
            PageHeader {
                title: t.t("AI Study Buddy"),
                description: t.t("Ask any question on any topic, and our AI will provide a clear, concise explanation to help you learn."),
            }

            form { class: "card", onsubmit: on_submit,
                h3 { {t.t("Ask a Question")} }
                label { r#for: "ask-topic", {t.t("Topic")} }
                input {
                    id: "ask-topic",
                    r#type: "text",
                    value: "{topic}",
                    placeholder: t.t("e.g., Photosynthesis"),
                    oninput: move |evt| topic.set(evt.value()),
                }
                label { r#for: "ask-question", {t.t("Your Question")} }
                textarea {
                    id: "ask-question",
                    rows: 4,
                    value: "{question}",
                    placeholder: t.t("e.g., What are the main inputs and outputs of the Calvin Cycle?"),
                    oninput: move |evt| question.set(evt.value()),
                }
                if let Some(message) = form_error() {
                    p { class: "form-error", "{message}" }
                }
                button { class: "btn primary", r#type: "submit", disabled: loading,
                    if loading {
                        {t.t("Generating Answer...")}
                    } else {
                        {t.t("Get Answer")}
                    }
                }
            }

            match answer() {
                ViewState::Idle | ViewState::Loading => rsx! {},
                ViewState::Ready(html) => rsx! {
                    section { class: "card result-card",
                        h3 { {t.t("AI Answer")} }
                        RichText { html }
                    }
                },
                ViewState::Error(err) => rsx! {
                    ErrorCard { title: t.t("Error"), message: err.message(&t) }
                },
            }
        }
    }
}
