mod chat;
mod forms;
mod ids;
mod profile;
mod progress;
mod quiz;
mod quiz_result;
mod quiz_session;

pub use chat::{ChatLog, ChatMessage, ChatRole, ReadAloud, ReadAloudAction, StudyMode};
pub use forms::{
    DEFAULT_QUIZ_QUESTIONS, MAX_QUIZ_QUESTIONS, MIN_QUERY_CHARS, MIN_QUESTION_CHARS,
    MIN_QUIZ_QUESTIONS, MIN_SUMMARY_TEXT_CHARS, MIN_TOPIC_CHARS, QUIZ_QUESTION_CHOICES,
    QuizSetup, validate_query, validate_question, validate_question_count,
    validate_summary_text, validate_topic,
};
pub use ids::{MessageId, QuizResultId, UserId};
pub use profile::{ProfileUpdate, UserProfile};
pub use progress::{MonthlyAverage, ProgressReport, TopicScore};
pub use quiz::{OPTIONS_PER_QUESTION, QuizQuestion, QuizQuestionError, score_answers};
pub use quiz_result::{NewQuizResult, QuizResult, QuizResultError};
pub use quiz_session::{QuizSession, QuizSessionError, QuizState};
