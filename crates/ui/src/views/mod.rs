mod ask;
mod chat;
mod components;
mod profile;
mod quiz;
mod state;
mod story;
mod summarizer;

pub use ask::AskView;
pub use chat::ChatView;
pub use profile::ProfileView;
pub use quiz::QuizView;
pub use state::{ViewError, ViewState};
pub use story::StoryView;
pub use summarizer::SummarizerView;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
