use buddy_core::i18n::Translator;
use buddy_core::model::{QuizSession, QuizState};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub label: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveQuestionVm {
    pub progress: String,
    pub question: String,
    pub options: Vec<OptionVm>,
    pub can_advance: bool,
    pub advance_label: String,
    /// Shown when the generator returned a different number of questions.
    pub notice: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewRowVm {
    pub question: String,
    pub your_answer: String,
    pub correct_answer: String,
    pub correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizResultsVm {
    pub topic: String,
    pub score_line: String,
    pub rows: Vec<ReviewRowVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizVm {
    Setup { error: Option<String> },
    Generating,
    Active(ActiveQuestionVm),
    Results(QuizResultsVm),
}

#[must_use]
pub fn map_quiz_session(session: &QuizSession, t: &Translator) -> QuizVm {
    match session.state() {
        QuizState::Setup => QuizVm::Setup {
            error: session.error().map(str::to_owned),
        },
        QuizState::Generating => QuizVm::Generating,
        QuizState::Active => map_active(session, t),
        QuizState::Results => QuizVm::Results(map_results(session, t)),
    }
}

fn map_active(session: &QuizSession, t: &Translator) -> QuizVm {
    let Some(question) = session.current_question() else {
        return QuizVm::Generating;
    };
    let chosen = session.current_answer();
    let options = question
        .options()
        .iter()
        .map(|option| OptionVm {
            label: option.clone(),
            selected: chosen == Some(option.as_str()),
        })
        .collect();

    let progress = t.t_with(
        "Question {currentQuestionIndex} of {quizLength}",
        &[
            ("currentQuestionIndex", (session.current_index() + 1).to_string()),
            ("quizLength", session.questions().len().to_string()),
        ],
    );
    let advance_label = if session.is_last_question() {
        t.t("Submit Quiz")
    } else {
        t.t("Next Question")
    };

    QuizVm::Active(ActiveQuestionVm {
        progress,
        question: question.question().to_string(),
        options,
        can_advance: chosen.is_some(),
        advance_label,
        notice: session
            .count_mismatch()
            .then(|| t.t("Some questions could not be generated.")),
    })
}

fn map_results(session: &QuizSession, t: &Translator) -> QuizResultsVm {
    let rows = session
        .questions()
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let given = session
                .user_answers()
                .get(index)
                .map(String::as_str)
                .unwrap_or_default();
            ReviewRowVm {
                question: question.question().to_string(),
                your_answer: t.t_with("Your answer: {answer}", &[("answer", given.to_string())]),
                correct_answer: t.t_with(
                    "Correct answer: {answer}",
                    &[("answer", question.answer().to_string())],
                ),
                correct: question.is_correct(given),
            }
        })
        .collect();

    QuizResultsVm {
        topic: session.topic().to_string(),
        score_line: format!(
            "{} {} / {}",
            t.t("You scored"),
            session.score(),
            session.questions().len()
        ),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buddy_core::i18n::Language;
    use buddy_core::model::{QuizQuestion, QuizSetup};

    fn question(text: &str, answer: &str) -> QuizQuestion {
        QuizQuestion::new(
            text,
            vec!["A".into(), "B".into(), "C".into(), "D".into()],
            answer,
        )
        .unwrap()
    }

    fn active_session() -> QuizSession {
        let mut session = QuizSession::new();
        session
            .begin_generation(&QuizSetup::new("Letters", 3).unwrap())
            .unwrap();
        session
            .activate(vec![question("First?", "A"), question("Second?", "B")])
            .unwrap();
        session
    }

    #[test]
    fn active_question_tracks_selection_and_progress() {
        let t = Translator::builtin(Language::English);
        let mut session = active_session();

        let QuizVm::Active(vm) = map_quiz_session(&session, &t) else {
            panic!("expected an active quiz");
        };
        assert_eq!(vm.progress, "Question 1 of 2");
        assert_eq!(vm.notice.as_deref(), Some("Some questions could not be generated."));
        assert!(!vm.can_advance);
        assert_eq!(vm.advance_label, "Next Question");

        session.select_current("C").unwrap();
        session.advance().unwrap();
        session.select_current("B").unwrap();
        let QuizVm::Active(vm) = map_quiz_session(&session, &t) else {
            panic!("expected an active quiz");
        };
        assert_eq!(vm.progress, "Question 2 of 2");
        assert!(vm.can_advance);
        assert!(vm.options[1].selected);
        assert_eq!(vm.advance_label, "Submit Quiz");
    }

    #[test]
    fn results_list_each_answer() {
        let t = Translator::builtin(Language::English);
        let mut session = active_session();
        session.select_current("A").unwrap();
        session.advance().unwrap();
        session.select_current("D").unwrap();
        session.advance().unwrap();

        let QuizVm::Results(vm) = map_quiz_session(&session, &t) else {
            panic!("expected results");
        };
        assert_eq!(vm.score_line, "You scored 1 / 2");
        assert!(vm.rows[0].correct);
        assert!(!vm.rows[1].correct);
        assert_eq!(vm.rows[1].your_answer, "Your answer: D");
        assert_eq!(vm.rows[1].correct_answer, "Correct answer: B");
    }

    #[test]
    fn failed_generation_returns_to_setup_with_message() {
        let t = Translator::builtin(Language::English);
        let mut session = QuizSession::new();
        session
            .begin_generation(&QuizSetup::new("Letters", 3).unwrap())
            .unwrap();
        session.fail_generation("model offline").unwrap();

        assert_eq!(
            map_quiz_session(&session, &t),
            QuizVm::Setup {
                error: Some("model offline".into())
            }
        );
    }
}
