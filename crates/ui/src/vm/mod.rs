mod chat_vm;
mod markdown_vm;
mod profile_vm;
mod quiz_vm;
mod time_fmt;

pub use chat_vm::{ChatVm, MessageBody, MessageVm, ReadAloudVm, map_chat_log};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use profile_vm::{BarVm, ProfileHeaderVm, ProgressVm, map_profile_header, map_progress};
pub use quiz_vm::{ActiveQuestionVm, OptionVm, QuizResultsVm, QuizVm, ReviewRowVm, map_quiz_session};
