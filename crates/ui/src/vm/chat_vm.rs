use buddy_core::i18n::Translator;
use buddy_core::model::{ChatLog, ChatMessage, ChatRole, MessageId, ReadAloud};

use crate::vm::markdown_to_html;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadAloudVm {
    Unavailable,
    Idle,
    Loading,
    Speaking,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MessageVm {
    pub id: MessageId,
    pub from_user: bool,
    pub is_error: bool,
    pub pinned: bool,
    pub mode_label: String,
    /// Plain text for user messages and errors, sanitized HTML for replies.
    pub body: MessageBody,
    pub read_aloud: ReadAloudVm,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageBody {
    Text(String),
    Html(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatVm {
    pub messages: Vec<MessageVm>,
    pub pinned: Vec<MessageVm>,
}

impl ChatVm {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[must_use]
pub fn map_chat_log(log: &ChatLog, t: &Translator) -> ChatVm {
    let state = log.read_aloud();
    let messages = log
        .messages()
        .iter()
        .map(|message| map_message(message, state, t))
        .collect();
    let pinned = log
        .pinned()
        .map(|message| map_message(message, state, t))
        .collect();
    ChatVm { messages, pinned }
}

fn map_message(message: &ChatMessage, state: ReadAloud, t: &Translator) -> MessageVm {
    let from_user = message.role() == ChatRole::User;
    let body = if from_user || message.is_error() {
        MessageBody::Text(message.content().to_string())
    } else {
        MessageBody::Html(markdown_to_html(message.content()))
    };

    let read_aloud = if !message.can_read_aloud() {
        ReadAloudVm::Unavailable
    } else {
        match state {
            ReadAloud::Loading(id) if id == message.id() => ReadAloudVm::Loading,
            ReadAloud::Speaking(id) if id == message.id() => ReadAloudVm::Speaking,
            _ => ReadAloudVm::Idle,
        }
    };

    MessageVm {
        id: message.id(),
        from_user,
        is_error: message.is_error(),
        pinned: message.is_pinned(),
        mode_label: t.t(message.mode().label_key()),
        body,
        read_aloud,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buddy_core::i18n::Language;
    use buddy_core::model::{ReadAloudAction, StudyMode};

    #[test]
    fn maps_roles_pins_and_read_aloud_state() {
        let mut log = ChatLog::new();
        log.push_user(StudyMode::ExplainTopic, "gravity");
        let reply = log.push_assistant(StudyMode::ExplainTopic, "**Gravity** pulls.");
        log.push_error(StudyMode::ExplainTopic, "Error: boom");
        log.toggle_pin(reply);
        assert_eq!(log.toggle_read_aloud(reply), ReadAloudAction::Start(reply));

        let t = Translator::builtin(Language::Spanish);
        let vm = map_chat_log(&log, &t);

        assert_eq!(vm.messages.len(), 3);
        assert!(vm.messages[0].from_user);
        assert_eq!(vm.messages[0].read_aloud, ReadAloudVm::Unavailable);
        assert_eq!(vm.messages[0].mode_label, "Explicar Tema");

        let answer = &vm.messages[1];
        assert!(answer.pinned);
        assert_eq!(answer.read_aloud, ReadAloudVm::Loading);
        assert!(matches!(&answer.body, MessageBody::Html(html) if html.contains("<strong>Gravity</strong>")));

        assert!(vm.messages[2].is_error);
        assert_eq!(vm.messages[2].read_aloud, ReadAloudVm::Unavailable);
        assert_eq!(vm.pinned.len(), 1);
        assert_eq!(vm.pinned[0].id, reply);
    }
}
