use buddy_core::i18n::Translator;
use buddy_core::model::MessageId;
use dioxus::prelude::*;

use crate::context::{AppContext, use_translator, use_ui_state};
use crate::views::components::{AudioPlayer, RichText};
use crate::vm::{MessageBody, MessageVm, ReadAloudVm, map_chat_log};

use super::actions::use_chat_actions;
use super::state::use_chat_state;

/// Button captions for a message row, resolved once per render.
#[derive(Clone, Debug, PartialEq, Eq)]
struct RowLabels {
    pin: String,
    unpin: String,
    copy: String,
    read_aloud: String,
    stop: String,
    loading: String,
}

impl RowLabels {
    fn new(t: &Translator) -> Self {
        Self {
            pin: t.t("Pin"),
            unpin: t.t("Unpin"),
            copy: t.t("Copy"),
            read_aloud: t.t("Read Aloud"),
            stop: t.t("Stop"),
            loading: t.t("Loading..."),
        }
    }
}

#[component]
pub fn ChatView() -> Element {
    let ctx = use_context::<AppContext>();
    let ui = use_ui_state();
    let t = use_translator();
    let state = use_chat_state();
    let actions = use_chat_actions(&ctx, ui, state);

    let vm = map_chat_log(&ui.chat_log.read(), &t);
    let mode = (ui.mode)();
    let labels = RowLabels::new(&t);
    let pending = (state.pending)();
    let mut draft = state.draft;

    rsx! {
        div { class: "page chat-page",
            header { class: "page-header",
                h2 { {t.t(mode.label_key())} }
            }

            if !ctx.ai_enabled() {
                p { class: "banner warning",
                    {t.t("The AI service is not configured. Set BUDDY_AI_API_KEY in your .env file.")}
                }
            }

            if !vm.pinned.is_empty() {
                section { class: "pinned",
                    h3 { {t.t("Pinned")} }
                    ul {
                        for message in vm.pinned.iter().cloned() {
                            li { key: "{message.id.value()}",
                                MessageContent { message }
                            }
                        }
                    }
                }
            }

            div { class: "transcript",
                if vm.is_empty() {
                    div { class: "message assistant greeting",
                        p {
                            {t.t("Hello! I am your AI Study Buddy. Select a mode on the left and let's start learning.")}
                        }
                    }
                }
                for message in vm.messages.iter().cloned() {
                    MessageRow {
                        key: "{message.id.value()}",
                        message,
                        labels: labels.clone(),
                        on_pin: actions.toggle_pin,
                        on_copy: actions.copy,
                        on_read_aloud: actions.toggle_read_aloud,
                    }
                }
                if pending {
                    div { class: "message assistant thinking", {t.t("Thinking...")} }
                }
                div { id: "chat-end" }
            }

            if let Some((id, clip)) = (state.clip)() {
                AudioPlayer {
                    clip,
                    on_finished: move |()| actions.audio_finished.call(id),
                    on_failed: move |()| actions.audio_failed.call(id),
                }
            }

            if let Some(notice) = (state.notice)() {
                div { class: "{notice.class_name()}",
                    if let Some(title) = notice.title {
                        strong { "{title}" }
                    }
                    span { "{notice.message}" }
                }
            }

            form {
                class: "chat-input",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    actions.submit.call(());
                },
                input {
                    r#type: "text",
                    value: "{draft}",
                    placeholder: t.t("Type a topic or concept..."),
                    disabled: pending,
                    oninput: move |evt| draft.set(evt.value()),
                }
                button { class: "btn primary", r#type: "submit", disabled: pending,
                    {t.t("Send")}
                }
            }
            if let Some(err) = (state.form_error)() {
                p { class: "form-error", "{err}" }
            }
            p { class: "disclaimer muted",
                {t.t("AI can make mistakes. Always verify important information.")}
            }
        }
    }
}

#[component]
fn MessageRow(
    message: MessageVm,
    labels: RowLabels,
    on_pin: EventHandler<MessageId>,
    on_copy: EventHandler<MessageId>,
    on_read_aloud: EventHandler<MessageId>,
) -> Element {
    let id = message.id;
    let role_class = if message.from_user { "user" } else { "assistant" };
    let error_class = if message.is_error { " error" } else { "" };
    let pin_label = if message.pinned {
        labels.unpin.clone()
    } else {
        labels.pin.clone()
    };
    let read_aloud_label = match message.read_aloud {
        ReadAloudVm::Loading => Some(labels.loading.clone()),
        ReadAloudVm::Speaking => Some(labels.stop.clone()),
        ReadAloudVm::Idle => Some(labels.read_aloud.clone()),
        ReadAloudVm::Unavailable => None,
    };

    rsx! {
        div { class: "message {role_class}{error_class}",
            span { class: "message-mode", "{message.mode_label}" }
            MessageContent { message: message.clone() }
            if !message.from_user && !message.is_error {
                div { class: "message-actions",
                    button { class: "btn link", r#type: "button", onclick: move |_| on_pin.call(id),
                        "{pin_label}"
                    }
                    button { class: "btn link", r#type: "button", onclick: move |_| on_copy.call(id),
                        "{labels.copy}"
                    }
                    if let Some(label) = read_aloud_label {
                        button {
                            class: "btn link",
                            r#type: "button",
                            onclick: move |_| on_read_aloud.call(id),
                            "{label}"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn MessageContent(message: MessageVm) -> Element {
    match message.body {
        MessageBody::Html(html) => rsx! {
            RichText { html }
        },
        MessageBody::Text(text) => rsx! {
            p { class: "message-text", "{text}" }
        },
    }
}
