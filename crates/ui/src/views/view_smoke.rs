use buddy_core::i18n::Language;
use buddy_core::model::{
    ChatLog, NewQuizResult, ProfileUpdate, QuizQuestion, QuizSession, QuizSetup, StudyMode, UserId,
};
use buddy_core::time::fixed_now;
use storage::repository::Storage;

use crate::context::Theme;

use super::test_harness::{HarnessOptions, ViewKind, setup_view_harness, setup_view_harness_with};

fn question(text: &str, answer: &str) -> QuizQuestion {
    QuizQuestion::new(
        text,
        vec!["Mars".into(), "Venus".into(), "Earth".into(), "Jupiter".into()],
        answer,
    )
    .unwrap()
}

fn active_quiz() -> QuizSession {
    let mut session = QuizSession::new();
    session
        .begin_generation(&QuizSetup::new("Planets", 3).unwrap())
        .unwrap();
    session
        .activate(vec![
            question("Which planet is red?", "Mars"),
            question("Which planet is largest?", "Jupiter"),
            question("Which planet do we live on?", "Earth"),
        ])
        .unwrap();
    session
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_setup_form() {
    let mut harness = setup_view_harness(ViewKind::Quiz);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Create a Practice Quiz"), "missing title in {html}");
    assert!(html.contains("Number of Questions"), "missing count label in {html}");
    for choice in ["3", "5", "10"] {
        assert!(
            html.contains(&format!("value=\"{choice}\"")),
            "missing choice {choice} in {html}"
        );
    }
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_translates_to_spanish() {
    let mut harness = setup_view_harness_with(
        ViewKind::Quiz,
        HarnessOptions {
            language: Language::Spanish,
            ..HarnessOptions::default()
        },
    );
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Generar Cuestionario"), "missing Spanish button in {html}");
    assert!(!html.contains("Create a Practice Quiz"), "English leaked into {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_active_question() {
    let mut harness = setup_view_harness_with(
        ViewKind::Quiz,
        HarnessOptions {
            quiz: active_quiz(),
            ..HarnessOptions::default()
        },
    );
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Question 1 of 3"), "missing progress in {html}");
    assert!(html.contains("Which planet is red?"), "missing question in {html}");
    assert!(html.contains("Jupiter"), "missing option in {html}");
    assert!(html.contains("Next Question"), "missing advance button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_results() {
    let mut quiz = active_quiz();
    for answer in ["Mars", "Venus", "Earth"] {
        quiz.select_current(answer).unwrap();
        quiz.advance().unwrap();
    }
    let mut harness = setup_view_harness_with(
        ViewKind::Quiz,
        HarnessOptions {
            quiz,
            ..HarnessOptions::default()
        },
    );
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Quiz Complete!"), "missing title in {html}");
    assert!(html.contains("You scored 2 / 3"), "missing score in {html}");
    assert!(html.contains("Correct answer: Jupiter"), "missing review in {html}");
    assert!(html.contains("Take Another Quiz"), "missing restart in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn chat_view_smoke_renders_greeting_and_missing_key_banner() {
    let mut harness = setup_view_harness_with(
        ViewKind::Chat,
        HarnessOptions {
            ai_enabled: false,
            ..HarnessOptions::default()
        },
    );
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Hello! I am your AI Study Buddy."), "missing greeting in {html}");
    assert!(html.contains("BUDDY_AI_API_KEY"), "missing configuration banner in {html}");
    assert!(html.contains("Type a topic or concept..."), "missing input in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn chat_view_smoke_renders_transcript_and_pins() {
    let mut log = ChatLog::new();
    log.push_user(StudyMode::ExplainTopic, "osmosis");
    let reply = log.push_assistant(StudyMode::ExplainTopic, "Water moves **across** a membrane.");
    log.push_error(StudyMode::ExplainTopic, "Error: model offline");
    log.toggle_pin(reply);

    let mut harness = setup_view_harness_with(
        ViewKind::Chat,
        HarnessOptions {
            chat_log: log,
            ..HarnessOptions::default()
        },
    );
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("osmosis"), "missing user message in {html}");
    assert!(html.contains("<strong>across</strong>"), "reply not rendered as markdown in {html}");
    assert!(html.contains("Error: model offline"), "missing error message in {html}");
    assert!(html.contains("Pinned"), "missing pinned section in {html}");
    assert!(html.contains("Unpin"), "missing unpin action in {html}");
    assert!(html.contains("Read Aloud"), "missing read aloud action in {html}");
    assert!(!html.contains("Hello! I am your AI Study Buddy."), "greeting shown with messages in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn generator_views_smoke_render_forms() {
    for (view, expected) in [
        (ViewKind::Summarizer, "Text to Summarize"),
        (ViewKind::Story, "Story Topic"),
        (ViewKind::Ask, "Your Question"),
    ] {
        let mut harness = setup_view_harness(view);
        harness.rebuild();
        let html = harness.render();
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_smoke_without_store() {
    let mut harness = setup_view_harness(ViewKind::Profile);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Profiles are not configured."), "missing notice in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_smoke_without_viewer() {
    let mut harness = setup_view_harness_with(
        ViewKind::Profile,
        HarnessOptions {
            storage: Some(Storage::in_memory()),
            ..HarnessOptions::default()
        },
    );
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Not signed in."), "missing notice in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn profile_view_smoke_renders_live_profile_and_progress() {
    let storage = Storage::in_memory();
    let user = UserId::new("ada").unwrap();
    storage
        .quiz_results
        .append_result(&NewQuizResult::new(user.clone(), "Chemistry", 3, 4, fixed_now()).unwrap())
        .await
        .expect("append result");

    let mut harness = setup_view_harness_with(
        ViewKind::Profile,
        HarnessOptions {
            storage: Some(storage),
            ..HarnessOptions::default()
        },
    );
    let profiles = harness.services.profiles().expect("profile service");
    profiles
        .sign_in(
            user,
            ProfileUpdate {
                display_name: Some("Ada Lovelace".into()),
                email: Some("ada@example.com".into()),
                photo_url: None,
            },
        )
        .await
        .expect("sign in");

    harness.rebuild();
    for _ in 0..3 {
        harness.drive_async().await;
    }
    let html = harness.render();

    assert!(html.contains("Ada Lovelace"), "missing name in {html}");
    assert!(html.contains("AL"), "missing initials in {html}");
    assert!(html.contains("Member since"), "missing member since in {html}");
    assert!(html.contains("Chemistry"), "missing topic bar in {html}");
    assert!(html.contains("width: 75%"), "missing bar width in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn shell_smoke_sidebar_offers_dark_mode() {
    let mut harness = setup_view_harness(ViewKind::Shell);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Configuration"), "missing settings heading in {html}");
    assert!(html.contains("Dark Mode"), "missing theme toggle in {html}");
    assert!(html.contains("id=\"dark-mode\""), "missing checkbox in {html}");
    assert!(html.contains("Clear Chat"), "missing clear button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn shell_smoke_sidebar_translates_theme_toggle() {
    let mut harness = setup_view_harness_with(
        ViewKind::Shell,
        HarnessOptions {
            language: Language::Spanish,
            theme: Theme::Dark,
            ..HarnessOptions::default()
        },
    );
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Modo oscuro"), "missing Spanish toggle in {html}");
}
