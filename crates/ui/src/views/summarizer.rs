use dioxus::prelude::*;
use services::StudyError;
use services::flows::{SummarizeText, SummarizeTextInput};

use crate::context::{AppContext, use_translator, use_ui_state};
use crate::views::components::{ErrorCard, PageHeader, RichText};
use crate::views::{ViewError, ViewState};
use crate::vm::markdown_to_html;

#[component]
pub fn SummarizerView() -> Element {
    let ctx = use_context::<AppContext>();
    let ui = use_ui_state();
    let t = use_translator();

    let mut text = use_signal(String::new);
    let mut form_error = use_signal(|| None::<String>);
    let mut summary = use_signal(|| ViewState::<String>::Idle);

    let on_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if summary.peek().is_loading() {
            return;
        }
        let t = ctx.translator(*ui.language.peek());
        let input = match SummarizeTextInput::new(&text.peek()) {
            Ok(input) => input,
            Err(err) => {
                form_error.set(Some(t.t(err.message_key())));
                return;
            }
        };
        form_error.set(None);
        summary.set(ViewState::Loading);

        let flows = ctx.flows();
        spawn(async move {
            let mut summary = summary;
            let result = flows
                .run::<SummarizeText>(&input)
                .await
                .map(|output| markdown_to_html(&output.summary))
                .map_err(|err| ViewError::from_study(&StudyError::from(err), &t));
            summary.set(result.into());
        });
    };

    let loading = summary.read().is_loading();

    rsx! {
        div { class: "page summarizer-page",
            PageHeader {
                title: t.t("AI Text Summarizer"),
                description: t.t("Paste in any long text, article, or document, and get a quick, easy-to-read summary of the key points."),
            }

            form { class: "card", onsubmit: on_submit,
                h3 { {t.t("Summarize Your Text")} }
                label { r#for: "summary-text", {t.t("Text to Summarize")} }
                textarea {
                    id: "summary-text",
                    rows: 10,
                    value: "{text}",
                    placeholder: t.t("Paste your text here..."),
                    oninput: move |evt| text.set(evt.value()),
                }
                if let Some(message) = form_error() {
                    p { class: "form-error", "{message}" }
                }
                button { class: "btn primary", r#type: "submit", disabled: loading,
                    if loading {
                        {t.t("Generating Summary...")}
                    } else {
                        {t.t("Summarize")}
                    }
                }
            }

            match summary() {
                ViewState::Idle | ViewState::Loading => rsx! {},
                ViewState::Ready(html) => rsx! {
                    section { class: "card result-card",
                        h3 { {t.t("Summary")} }
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
