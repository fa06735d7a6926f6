use buddy_core::ValidationError;
use buddy_core::i18n::Translator;
use buddy_core::model::{ChatLog, MessageId, StudyMode, validate_query};

use tracing::debug;

use crate::error::StudyError;
use crate::flows::{
    AnswerQuestion, AnswerQuestionInput, FlowRunner, GenerateStory, GenerateStoryInput,
    SummarizeText, SummarizeTextInput,
};

/// A query that made it into the log and now waits for its reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuery {
    query: String,
    epoch: u64,
}

impl PendingQuery {
    /// The trimmed query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// Routes chat submissions to the flow behind the selected mode.
#[derive(Clone)]
pub struct ChatService {
    runner: FlowRunner,
}

impl ChatService {
    #[must_use]
    pub fn new(runner: FlowRunner) -> Self {
        Self { runner }
    }

    /// Submit `query`: record it, ask the model, record the reply or the failure.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Validation` (log untouched) for a short query or
    /// for quiz mode. Flow failures are not errors here: they land in the log
    /// as an error message and the id of that message is returned.
    pub async fn submit(
        &self,
        log: &mut ChatLog,
        mode: StudyMode,
        query: &str,
        t: &Translator,
    ) -> Result<MessageId, StudyError> {
        let pending = Self::accept(log, mode, query)?;
        let reply = self.reply(mode, pending.query()).await;
        Ok(Self::append_reply(log, mode, reply, t))
    }

    /// Validate and append the user's message.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Validation` without touching the log.
    pub fn accept(
        log: &mut ChatLog,
        mode: StudyMode,
        query: &str,
    ) -> Result<PendingQuery, StudyError> {
        let query = validate_query(query)?;
        if mode == StudyMode::GenerateQuiz {
            return Err(ValidationError::QuizModeInChat.into());
        }
        log.push_user(mode, query.clone());
        Ok(PendingQuery {
            query,
            epoch: log.epoch(),
        })
    }

    /// Run the flow for `mode`.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Validation` when the query does not fit the flow's
    /// input, and `StudyError::Generation` when the call fails.
    pub async fn reply(&self, mode: StudyMode, query: &str) -> Result<String, StudyError> {
        match mode {
            StudyMode::ExplainTopic => {
                let question = format!("Please explain {query}.");
                let input = AnswerQuestionInput::new(query, &question)?;
                Ok(self.runner.run::<AnswerQuestion>(&input).await?.answer)
            }
            StudyMode::SummarizeText => {
                let input = SummarizeTextInput::new(query)?;
                Ok(self.runner.run::<SummarizeText>(&input).await?.summary)
            }
            StudyMode::CreateStory => {
                let input = GenerateStoryInput::new(query)?;
                Ok(self.runner.run::<GenerateStory>(&input).await?.story)
            }
            StudyMode::GenerateQuiz => Err(ValidationError::QuizModeInChat.into()),
        }
    }

    /// Append the assistant's side of the exchange.
    ///
    /// Returns `None` and drops the reply when the log was cleared after
    /// `pending` was accepted.
    pub fn finish(
        log: &mut ChatLog,
        pending: &PendingQuery,
        mode: StudyMode,
        reply: Result<String, StudyError>,
        t: &Translator,
    ) -> Option<MessageId> {
        if log.epoch() != pending.epoch {
            debug!(query = %pending.query, "chat was cleared; reply dropped");
            return None;
        }
        Some(Self::append_reply(log, mode, reply, t))
    }

    fn append_reply(
        log: &mut ChatLog,
        mode: StudyMode,
        reply: Result<String, StudyError>,
        t: &Translator,
    ) -> MessageId {
        match reply {
            Ok(text) => log.push_assistant(mode, text),
            Err(err) => log.push_error(
                mode,
                format!("{}{}", t.t("Error: "), err.user_message(t)),
            ),
        }
    }
}
