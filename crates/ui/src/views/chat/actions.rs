use std::time::Duration;

use buddy_core::model::{MessageId, ReadAloudAction};
use dioxus::document::eval;
use dioxus::prelude::*;
use services::ChatService;
use tracing::warn;

use crate::context::{AppContext, UiState};

use super::scripts::{SCROLL_TO_END_SCRIPT, copy_to_clipboard_script};
use super::state::{ChatPageState, Notice};

const NOTICE_SECS: u64 = 2;

#[derive(Clone, Copy)]
pub(super) struct ChatActions {
    pub submit: Callback<()>,
    pub toggle_pin: Callback<MessageId>,
    pub toggle_read_aloud: Callback<MessageId>,
    pub copy: Callback<MessageId>,
    pub audio_finished: Callback<MessageId>,
    pub audio_failed: Callback<MessageId>,
}

pub(super) fn use_chat_actions(ctx: &AppContext, ui: UiState, state: ChatPageState) -> ChatActions {
    let UiState {
        language,
        mode,
        mut chat_log,
        ..
    } = ui;
    let ChatPageState {
        mut draft,
        mut form_error,
        mut pending,
        mut clip,
        mut notice,
    } = state;

    let submit = {
        let ctx = ctx.clone();
        use_callback(move |()| {
            if *pending.peek() {
                return;
            }
            let t = ctx.translator(*language.peek());
            let mode = *mode.peek();
            let query = draft.peek().clone();

            let accepted = ChatService::accept(&mut chat_log.write(), mode, &query);
            match accepted {
                Err(err) => form_error.set(Some(err.user_message(&t))),
                Ok(accepted) => {
                    form_error.set(None);
                    draft.set(String::new());
                    pending.set(true);
                    let chat = ctx.chat();
                    spawn(async move {
                        let mut chat_log = chat_log;
                        let reply = chat.reply(mode, accepted.query()).await;
                        ChatService::finish(&mut chat_log.write(), &accepted, mode, reply, &t);
                        pending.set(false);
                        let _ = eval(SCROLL_TO_END_SCRIPT);
                    });
                }
            }
        })
    };

    let toggle_pin = use_callback(move |id: MessageId| {
        chat_log.write().toggle_pin(id);
    });

    let toggle_read_aloud = {
        let ctx = ctx.clone();
        use_callback(move |id: MessageId| {
            let action = chat_log.write().toggle_read_aloud(id);
            match action {
                ReadAloudAction::Start(id) => {
                    clip.set(None);
                    let text = chat_log
                        .peek()
                        .get(id)
                        .map(|message| message.content().to_string())
                        .unwrap_or_default();
                    let speech = ctx.speech();
                    let t = ctx.translator(*language.peek());
                    spawn(async move {
                        let mut chat_log = chat_log;
                        match speech.speak(&text).await {
                            Ok(audio) => {
                                if chat_log.write().audio_ready(id) {
                                    clip.set(Some((id, audio)));
                                }
                            }
                            Err(err) => {
                                chat_log.write().playback_finished(id);
                                notice.set(Some(Notice::error(
                                    t.t("Text-to-Speech Error"),
                                    err.user_message(&t),
                                )));
                            }
                        }
                    });
                }
                ReadAloudAction::Stop => clip.set(None),
                ReadAloudAction::Ignored => {}
            }
        })
    };

    let copy = {
        let ctx = ctx.clone();
        use_callback(move |id: MessageId| {
            let Some(text) = chat_log
                .peek()
                .get(id)
                .map(|message| message.content().to_string())
            else {
                return;
            };
            let t = ctx.translator(*language.peek());
            spawn(async move {
                let mut notice = notice;
                match eval(&copy_to_clipboard_script(&text)).await {
                    Ok(_) => notice.set(Some(Notice::info(t.t("Copied to clipboard!")))),
                    Err(err) => {
                        warn!(error = %err, "clipboard write failed");
                        notice.set(Some(Notice::error(
                            t.t("Error"),
                            t.t("Could not copy to clipboard."),
                        )));
                    }
                }
                tokio::time::sleep(Duration::from_secs(NOTICE_SECS)).await;
                notice.set(None);
            });
        })
    };

    let audio_finished = use_callback(move |id: MessageId| {
        chat_log.write().playback_finished(id);
        clip.set(None);
    });

    let audio_failed = {
        let ctx = ctx.clone();
        use_callback(move |id: MessageId| {
            let t = ctx.translator(*language.peek());
            chat_log.write().playback_finished(id);
            clip.set(None);
            notice.set(Some(Notice::error(
                t.t("Audio Error"),
                t.t("Could not play audio. Your browser might be blocking it."),
            )));
        })
    };

    ChatActions {
        submit,
        toggle_pin,
        toggle_read_aloud,
        copy,
        audio_finished,
        audio_failed,
    }
}
