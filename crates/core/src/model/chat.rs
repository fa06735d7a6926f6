use serde::{Deserialize, Serialize};

use crate::model::ids::MessageId;

/// Sidebar modes of the study buddy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StudyMode {
    #[default]
    ExplainTopic,
    GenerateQuiz,
    SummarizeText,
    CreateStory,
}

impl StudyMode {
    pub const ALL: [StudyMode; 4] = [
        StudyMode::ExplainTopic,
        StudyMode::GenerateQuiz,
        StudyMode::SummarizeText,
        StudyMode::CreateStory,
    ];

    /// Catalog key of the mode's sidebar label.
    #[must_use]
    pub fn label_key(self) -> &'static str {
        match self {
            StudyMode::ExplainTopic => "Explain Topic",
            StudyMode::GenerateQuiz => "Generate Quiz",
            StudyMode::SummarizeText => "Summarize Text",
            StudyMode::CreateStory => "Create a Story",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    id: MessageId,
    role: ChatRole,
    mode: StudyMode,
    content: String,
    pinned: bool,
    is_error: bool,
}

impl ChatMessage {
    #[must_use]
    pub fn id(&self) -> MessageId {
        self.id
    }

    #[must_use]
    pub fn role(&self) -> ChatRole {
        self.role
    }

    #[must_use]
    pub fn mode(&self) -> StudyMode {
        self.mode
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.is_error
    }

    /// Only successful assistant replies can be read aloud.
    #[must_use]
    pub fn can_read_aloud(&self) -> bool {
        self.role == ChatRole::Assistant && !self.is_error
    }
}

/// Which message, if any, is being turned into speech or played.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadAloud {
    #[default]
    Idle,
    Loading(MessageId),
    Speaking(MessageId),
}

impl ReadAloud {
    #[must_use]
    pub fn target(self) -> Option<MessageId> {
        match self {
            ReadAloud::Idle => None,
            ReadAloud::Loading(id) | ReadAloud::Speaking(id) => Some(id),
        }
    }
}

/// What the caller should do after toggling read-aloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadAloudAction {
    /// Fetch speech for this message.
    Start(MessageId),
    /// Stop whatever is playing.
    Stop,
    /// Unknown message or not readable.
    Ignored,
}

/// Transcript of the chat page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    next_id: u64,
    epoch: u64,
    read_aloud: ReadAloud,
}

impl ChatLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, mode: StudyMode, content: impl Into<String>) -> MessageId {
        self.push(ChatRole::User, mode, content.into(), false)
    }

    pub fn push_assistant(&mut self, mode: StudyMode, content: impl Into<String>) -> MessageId {
        self.push(ChatRole::Assistant, mode, content.into(), false)
    }

    pub fn push_error(&mut self, mode: StudyMode, content: impl Into<String>) -> MessageId {
        self.push(ChatRole::Assistant, mode, content.into(), true)
    }

    fn push(&mut self, role: ChatRole, mode: StudyMode, content: String, is_error: bool) -> MessageId {
        self.next_id += 1;
        let id = MessageId::new(self.next_id);
        self.messages.push(ChatMessage {
            id,
            role,
            mode,
            content,
            pinned: false,
            is_error,
        });
        id
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn get(&self, id: MessageId) -> Option<&ChatMessage> {
        self.messages.iter().find(|message| message.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Flips the pin flag. Returns the new value, `None` for unknown ids.
    pub fn toggle_pin(&mut self, id: MessageId) -> Option<bool> {
        let message = self.messages.iter_mut().find(|message| message.id == id)?;
        message.pinned = !message.pinned;
        Some(message.pinned)
    }

    pub fn pinned(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter().filter(|message| message.pinned)
    }

    /// Drops every message and starts a new epoch. Ids keep increasing across clears.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.epoch += 1;
        self.read_aloud = ReadAloud::Idle;
    }

    /// Number of clears so far. A reply requested in an older epoch is stale.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    #[must_use]
    pub fn read_aloud(&self) -> ReadAloud {
        self.read_aloud
    }

    /// Toggling the active message stops it; any other readable message starts loading.
    pub fn toggle_read_aloud(&mut self, id: MessageId) -> ReadAloudAction {
        if self.read_aloud.target() == Some(id) {
            self.read_aloud = ReadAloud::Idle;
            return ReadAloudAction::Stop;
        }
        match self.get(id) {
            Some(message) if message.can_read_aloud() => {
                self.read_aloud = ReadAloud::Loading(id);
                ReadAloudAction::Start(id)
            }
            _ => ReadAloudAction::Ignored,
        }
    }

    /// Loading → Speaking. Returns `false` when the request went stale meanwhile.
    pub fn audio_ready(&mut self, id: MessageId) -> bool {
        if self.read_aloud == ReadAloud::Loading(id) {
            self.read_aloud = ReadAloud::Speaking(id);
            true
        } else {
            false
        }
    }

    /// Playback ended or failed for `id`.
    pub fn playback_finished(&mut self, id: MessageId) {
        if self.read_aloud.target() == Some(id) {
            self.read_aloud = ReadAloud::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase_and_survive_clear() {
        let mut log = ChatLog::new();
        let first = log.push_user(StudyMode::ExplainTopic, "photosynthesis");
        log.clear();
        let second = log.push_user(StudyMode::ExplainTopic, "osmosis");
        assert!(second > first);
        assert_eq!(log.messages().len(), 1);
    }

    #[test]
    fn clear_starts_a_new_epoch() {
        let mut log = ChatLog::new();
        let before = log.epoch();
        log.push_user(StudyMode::ExplainTopic, "osmosis");
        assert_eq!(log.epoch(), before);
        log.clear();
        assert_eq!(log.epoch(), before + 1);
    }

    #[test]
    fn pin_toggles_and_lists_in_order() {
        let mut log = ChatLog::new();
        let a = log.push_user(StudyMode::ExplainTopic, "a");
        let b = log.push_assistant(StudyMode::ExplainTopic, "b");
        let c = log.push_assistant(StudyMode::ExplainTopic, "c");
        assert_eq!(log.toggle_pin(c), Some(true));
        assert_eq!(log.toggle_pin(a), Some(true));
        let pinned: Vec<_> = log.pinned().map(ChatMessage::id).collect();
        assert_eq!(pinned, vec![a, c]);
        assert_eq!(log.toggle_pin(a), Some(false));
        assert_eq!(log.toggle_pin(MessageId::new(99)), None);
        assert!(!log.get(b).unwrap().is_pinned());
    }

    #[test]
    fn read_aloud_cycle() {
        let mut log = ChatLog::new();
        let question = log.push_user(StudyMode::ExplainTopic, "q");
        let answer = log.push_assistant(StudyMode::ExplainTopic, "a");
        let failed = log.push_error(StudyMode::ExplainTopic, "Error: boom");

        assert_eq!(log.toggle_read_aloud(question), ReadAloudAction::Ignored);
        assert_eq!(log.toggle_read_aloud(failed), ReadAloudAction::Ignored);

        assert_eq!(log.toggle_read_aloud(answer), ReadAloudAction::Start(answer));
        assert_eq!(log.read_aloud(), ReadAloud::Loading(answer));
        assert!(log.audio_ready(answer));
        assert_eq!(log.read_aloud(), ReadAloud::Speaking(answer));

        assert_eq!(log.toggle_read_aloud(answer), ReadAloudAction::Stop);
        assert_eq!(log.read_aloud(), ReadAloud::Idle);
        assert!(!log.audio_ready(answer));
    }

    #[test]
    fn playback_finished_ignores_other_messages() {
        let mut log = ChatLog::new();
        let first = log.push_assistant(StudyMode::CreateStory, "once upon a time");
        let second = log.push_assistant(StudyMode::CreateStory, "the end");
        log.toggle_read_aloud(first);
        log.playback_finished(second);
        assert_eq!(log.read_aloud(), ReadAloud::Loading(first));
        log.playback_finished(first);
        assert_eq!(log.read_aloud(), ReadAloud::Idle);
    }
}
