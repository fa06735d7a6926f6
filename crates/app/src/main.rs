use std::fmt;
use std::sync::Arc;

use buddy_core::Clock;
use buddy_core::i18n::Language;
use buddy_core::model::UserId;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::ai::config::{API_KEY_VAR, BASE_URL_VAR, MODEL_VAR, TTS_MODEL_VAR, TTS_VOICE_VAR};
use services::config::{DB_URL_VAR, LANGUAGE_VAR, USER_ID_VAR};
use services::{
    AppConfig, AppServices, ChatService, FlowRunner, ProfileService, QuizService, SpeechService,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidUserId { raw: String },
    InvalidLanguage { raw: String },
    MissingUser,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidUserId { raw } => write!(f, "invalid --user value: {raw:?}"),
            ArgsError::InvalidLanguage { raw } => write!(f, "invalid --language value: {raw}"),
            ArgsError::MissingUser => write!(f, "progress needs a profile store and a user"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
    language: Language,
}

impl UiApp for DesktopApp {
    fn initial_language(&self) -> Language {
        self.language
    }

    fn ai_enabled(&self) -> bool {
        self.services.ai_enabled()
    }

    fn flows(&self) -> FlowRunner {
        self.services.flows()
    }

    fn quiz(&self) -> Arc<QuizService> {
        self.services.quiz()
    }

    fn chat(&self) -> Arc<ChatService> {
        self.services.chat()
    }

    fn speech(&self) -> Arc<SpeechService> {
        self.services.speech()
    }

    fn profiles(&self) -> Option<Arc<ProfileService>> {
        self.services.profiles()
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui       [--db <sqlite_url>] [--user <id>] [--language <name>]");
    eprintln!("  cargo run -p app -- progress  --db <sqlite_url>   --user <id>");
    eprintln!();
    eprintln!("Without --db the app runs without profiles or quiz history.");
    eprintln!();
    eprintln!("Environment (a .env file in the working directory is loaded first):");
    eprintln!("  {API_KEY_VAR}, {BASE_URL_VAR}, {MODEL_VAR}, {TTS_MODEL_VAR}, {TTS_VOICE_VAR}");
    eprintln!("  {DB_URL_VAR}, {USER_ID_VAR}, {LANGUAGE_VAR}");
    eprintln!("  RUST_LOG (default: app=info,services=info,storage=info)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Progress,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "progress" => Some(Self::Progress),
            _ => None,
        }
    }
}

/// Apply command-line overrides on top of the environment.
fn parse_overrides(
    args: &mut impl Iterator<Item = String>,
    mut config: AppConfig,
) -> Result<AppConfig, ArgsError> {
    config.db_url = config.db_url.map(normalize_sqlite_url);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" => {
                let value = require_value(args, "--db")?;
                if value.trim().is_empty() {
                    return Err(ArgsError::InvalidDbUrl { raw: value });
                }
                config.db_url = Some(normalize_sqlite_url(value));
            }
            "--user" => {
                let value = require_value(args, "--user")?;
                let user_id =
                    UserId::new(value.clone()).map_err(|_| ArgsError::InvalidUserId { raw: value })?;
                config.user_id = Some(user_id);
            }
            "--language" => {
                let value = require_value(args, "--language")?;
                config.language = value
                    .parse()
                    .map_err(|_| ArgsError::InvalidLanguage { raw: value })?;
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }

    Ok(config)
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "app=info,services=info,storage=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is fine; the environment may already be set.
    let _ = dotenv::dotenv();
    init_tracing();

    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: launching UI when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let config = parse_overrides(&mut iter, AppConfig::from_env()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    if let Some(db_url) = config.db_url.as_deref() {
        ensure_db_dir(db_url)?;
    }
    let services = AppServices::from_config(&config, Clock::system()).await?;
    info!(
        ai = services.ai_enabled(),
        profiles = services.profiles().is_some(),
        language = %config.language,
        "services ready"
    );

    match cmd {
        Command::Ui => {
            let app = DesktopApp {
                services,
                language: config.language,
            };
            let app: Arc<dyn UiApp> = Arc::new(app);
            let context = build_app_context(&app);

            // tao sometimes starts always-on-top on macOS.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("ORIoN : AI STUDY BUDDY")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Progress => {
            let (Some(profiles), Some(user_id)) = (services.profiles(), config.user_id) else {
                return Err(ArgsError::MissingUser.into());
            };
            let report = profiles.progress(&user_id).await?;
            if report.is_empty() {
                println!("No quizzes completed yet.");
                return Ok(());
            }
            println!("By topic:");
            for topic in &report.by_topic {
                println!(
                    "  {:<24} {:>3}%  ({} attempts)",
                    topic.topic, topic.average_percent, topic.attempts
                );
            }
            println!("By month:");
            for month in &report.by_month {
                println!(
                    "  {} {}  {:>3}%",
                    month.label(),
                    month.year,
                    month.average_percent
                );
            }
            Ok(())
        }
    }
}

/// The sqlite driver creates the file itself but not missing directories.
fn ensure_db_dir(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = db_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }
    if let Some(parent) = std::path::Path::new(path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
