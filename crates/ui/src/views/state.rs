use buddy_core::i18n::Translator;
use services::StudyError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    Unknown,
    /// Already translated for display.
    Message(String),
}

impl ViewError {
    #[must_use]
    pub fn from_study(err: &StudyError, t: &Translator) -> Self {
        Self::Message(err.user_message(t))
    }

    #[must_use]
    pub fn message(&self, t: &Translator) -> String {
        match self {
            Self::Unknown => t.t("Something went wrong. Please try again."),
            Self::Message(message) => message.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

impl<T> ViewState<T> {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

impl<T> From<Result<T, ViewError>> for ViewState<T> {
    fn from(result: Result<T, ViewError>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) => Self::Error(err),
        }
    }
}
