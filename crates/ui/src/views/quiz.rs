use buddy_core::model::{DEFAULT_QUIZ_QUESTIONS, QUIZ_QUESTION_CHOICES, QuizSetup, QuizState};
use dioxus::prelude::*;
use services::StudyError;
use tracing::debug;

use crate::context::{AppContext, use_translator, use_ui_state};
use crate::views::components::{ErrorCard, PageHeader};
use crate::vm::{ActiveQuestionVm, QuizResultsVm, QuizVm, map_quiz_session};

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let ui = use_ui_state();
    let t = use_translator();
    let mut session = ui.quiz;

    let mut topic = use_signal(String::new);
    let mut count = use_signal(|| DEFAULT_QUIZ_QUESTIONS);
    let mut form_error = use_signal(|| None::<String>);

    let generate = {
        let ctx = ctx.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let t = ctx.translator(*ui.language.peek());
            let setup = match QuizSetup::new(&topic.peek(), *count.peek()) {
                Ok(setup) => setup,
                Err(err) => {
                    form_error.set(Some(t.t(err.message_key())));
                    return;
                }
            };
            form_error.set(None);
            if let Err(err) = session.write().begin_generation(&setup) {
                debug!(error = %err, "quiz generation already running");
                return;
            }

            let quiz = ctx.quiz();
            spawn(async move {
                let mut session = session;
                let generated = quiz.generate(&setup).await;
                let mut guard = session.write();
                let outcome = match generated {
                    Ok(questions) => guard.activate(questions),
                    Err(err) => guard.fail_generation(StudyError::from(err).user_message(&t)),
                };
                if let Err(err) = outcome {
                    debug!(error = %err, "quiz generation outcome ignored");
                }
            });
        }
    };

    let select = move |value: String| {
        if let Err(err) = session.write().select_current(value) {
            debug!(error = %err, "answer ignored");
        }
    };

    let advance = {
        let ctx = ctx.clone();
        move |()| {
            let state = session.write().advance();
            if let Ok(QuizState::Results) = state {
                let finished = session.peek().clone();
                let quiz = ctx.quiz();
                spawn(async move {
                    let _ = quiz.record_result(&finished).await;
                });
            }
        }
    };

    let restart = move |()| {
        session.write().restart();
        topic.set(String::new());
        count.set(DEFAULT_QUIZ_QUESTIONS);
    };

    let vm = map_quiz_session(&session.read(), &t);

    rsx! {
        div { class: "page quiz-page",
            PageHeader {
                title: t.t("Practice Quiz Generator"),
                description: t.t("Generate custom quizzes on any subject to reinforce your learning and prepare for exams."),
            }

            match vm {
                QuizVm::Setup { error } => rsx! {
                    form { class: "card quiz-setup", onsubmit: generate,
                        h3 { {t.t("Create a Practice Quiz")} }
                        p { class: "muted", {t.t("Test your knowledge on any topic.")} }

                        label { r#for: "quiz-topic", {t.t("Topic")} }
                        input {
                            id: "quiz-topic",
                            r#type: "text",
                            value: "{topic}",
                            placeholder: t.t("e.g., The Roman Empire"),
                            oninput: move |evt| topic.set(evt.value()),
                        }

                        label { r#for: "quiz-count", {t.t("Number of Questions")} }
                        select {
                            id: "quiz-count",
                            "aria-label": t.t("Select number of questions"),
                            onchange: move |evt| {
                                if let Ok(value) = evt.value().parse::<u32>() {
                                    count.set(value);
                                }
                            },
                            for choice in QUIZ_QUESTION_CHOICES {
                                option {
                                    value: "{choice}",
                                    selected: choice == count(),
                                    "{choice}"
                                }
                            }
                        }

                        if let Some(message) = form_error() {
                            p { class: "form-error", "{message}" }
                        }
                        button { class: "btn primary", r#type: "submit", {t.t("Generate Quiz")} }
                    }
                    if let Some(message) = error {
                        ErrorCard { title: t.t("Error"), message }
                    }
                },
                QuizVm::Generating => rsx! {
                    div { class: "card quiz-generating",
                        div { class: "spinner" }
                        p { {t.t("Generating your quiz...")} }
                    }
                },
                QuizVm::Active(question) => rsx! {
                    ActiveQuestion {
                        question,
                        on_select: select,
                        on_advance: advance,
                    }
                },
                QuizVm::Results(results) => rsx! {
                    QuizResults {
                        results,
                        title: t.t("Quiz Complete!"),
                        again_label: t.t("Take Another Quiz"),
                        on_restart: restart,
                    }
                },
            }
        }
    }
}

#[component]
fn ActiveQuestion(
    question: ActiveQuestionVm,
    on_select: EventHandler<String>,
    on_advance: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "card quiz-active",
            p { class: "quiz-progress muted", "{question.progress}" }
            if let Some(notice) = question.notice.clone() {
                p { class: "banner warning", "{notice}" }
            }
            h3 { class: "quiz-question", "{question.question}" }
            div { class: "quiz-options", role: "radiogroup",
                for option in question.options.iter().cloned() {
                    label { class: "{option_class(option.selected)}",
                        input {
                            r#type: "radio",
                            name: "quiz-answer",
                            value: "{option.label}",
                            checked: option.selected,
                            onchange: {
                                let label = option.label.clone();
                                move |_| on_select.call(label.clone())
                            },
                        }
                        span { "{option.label}" }
                    }
                }
            }
            button {
                class: "btn primary",
                r#type: "button",
                disabled: !question.can_advance,
                onclick: move |_| on_advance.call(()),
                "{question.advance_label}"
            }
        }
    }
}

#[component]
fn QuizResults(
    results: QuizResultsVm,
    title: String,
    again_label: String,
    on_restart: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "card quiz-results",
            h3 { "{title}" }
            p { class: "muted", "{results.topic}" }
            p { class: "quiz-score", "{results.score_line}" }
            ol { class: "quiz-review",
                for row in results.rows.iter().cloned() {
                    li { class: "{review_class(row.correct)}",
                        p { class: "quiz-question", "{row.question}" }
                        p { "{row.your_answer}" }
                        if !row.correct {
                            p { class: "muted", "{row.correct_answer}" }
                        }
                    }
                }
            }
            button {
                class: "btn primary",
                r#type: "button",
                onclick: move |_| on_restart.call(()),
                "{again_label}"
            }
        }
    }
}

fn option_class(selected: bool) -> &'static str {
    if selected {
        "quiz-option selected"
    } else {
        "quiz-option"
    }
}

fn review_class(correct: bool) -> &'static str {
    if correct { "correct" } else { "incorrect" }
}
