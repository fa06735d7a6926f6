use buddy_core::model::MessageId;
use dioxus::prelude::*;
use services::AudioClip;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct Notice {
    pub title: Option<String>,
    pub message: String,
}

impl Notice {
    pub(super) fn info(message: String) -> Self {
        Self {
            title: None,
            message,
        }
    }

    pub(super) fn error(title: String, message: String) -> Self {
        Self {
            title: Some(title),
            message,
        }
    }

    pub(super) fn class_name(&self) -> &'static str {
        if self.title.is_some() {
            "toast error"
        } else {
            "toast"
        }
    }
}

/// Page-local state; the transcript itself lives in `UiState`.
#[derive(Clone, Copy)]
pub(super) struct ChatPageState {
    pub draft: Signal<String>,
    pub form_error: Signal<Option<String>>,
    pub pending: Signal<bool>,
    pub clip: Signal<Option<(MessageId, AudioClip)>>,
    pub notice: Signal<Option<Notice>>,
}

pub(super) fn use_chat_state() -> ChatPageState {
    ChatPageState {
        draft: use_signal(String::new),
        form_error: use_signal(|| None),
        pending: use_signal(|| false),
        clip: use_signal(|| None),
        notice: use_signal(|| None),
    }
}
