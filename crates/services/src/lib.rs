#![forbid(unsafe_code)]

pub mod ai;
pub mod app_services;
pub mod chat_service;
pub mod config;
pub mod error;
pub mod flows;
pub mod profile_service;
pub mod quiz_service;
pub mod speech_service;

pub use buddy_core::Clock;

pub use ai::{AiConfig, ModelClient, OpenAiClient, SpeechAudio};
pub use app_services::AppServices;
pub use chat_service::{ChatService, PendingQuery};
pub use config::AppConfig;
pub use error::{AppServicesError, GenerationError, PlaybackError, StudyError};
pub use flows::{Flow, FlowRunner};
pub use profile_service::ProfileService;
pub use quiz_service::QuizService;
pub use speech_service::{AudioClip, SpeechService};
