use std::sync::Mutex;

use trivia_core::model::{AnswerChoices, Difficulty, Question, Screen, Streaks};

/// Notice shown when a question cannot be loaded.
pub const FETCH_FAILURE_NOTICE: &str =
    "Failed to load question. Please check your internet connection and try again.";

/// Highlight applied to an answer control after an answer is scored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChoiceMark {
    Correct,
    Incorrect,
}

impl ChoiceMark {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            ChoiceMark::Correct => "correct",
            ChoiceMark::Incorrect => "incorrect",
        }
    }
}

/// Feedback line shown under the choices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect,
}

impl Feedback {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Feedback::Correct => "✓ Correct!",
            Feedback::Incorrect => "✗ Wrong answer!",
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Feedback::Correct => "correct",
            Feedback::Incorrect => "incorrect",
        }
    }
}

/// Everything the question screen needs to draw one question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionView {
    pub category: String,
    pub difficulty: Difficulty,
    pub text: String,
    pub choices: Vec<String>,
}

impl QuestionView {
    #[must_use]
    pub fn new(question: &Question, choices: &AnswerChoices) -> Self {
        Self {
            category: question.category().to_string(),
            difficulty: question.difficulty(),
            text: question.text().to_string(),
            choices: choices.as_slice().to_vec(),
        }
    }
}

/// Render commands issued by `SessionController`.
///
/// Implementations must not call back into the controller.
pub trait Presenter: Send + Sync {
    fn show_screen(&self, screen: Screen);
    fn render_scores(&self, streaks: Streaks);
    /// Replace the question screen contents; clears marks, feedback and the disabled flag.
    fn render_question(&self, view: &QuestionView);
    fn disable_choices(&self);
    fn mark_choice(&self, index: usize, mark: ChoiceMark);
    fn show_feedback(&self, feedback: Feedback);
    fn notify_failure(&self, message: &str);
    fn render_game_over(&self, streaks: Streaks);
}

/// A single recorded render command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PresenterEvent {
    Screen(Screen),
    Scores(Streaks),
    Question(QuestionView),
    ChoicesDisabled,
    Mark(usize, ChoiceMark),
    Feedback(Feedback),
    Failure(String),
    GameOver(Streaks),
}

/// Presenter that records every command. Used by tests and headless runs.
#[derive(Default)]
pub struct RecordingPresenter {
    events: Mutex<Vec<PresenterEvent>>,
}

impl RecordingPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> Vec<PresenterEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    #[must_use]
    pub fn last_screen(&self) -> Option<Screen> {
        self.events().into_iter().rev().find_map(|event| match event {
            PresenterEvent::Screen(screen) => Some(screen),
            _ => None,
        })
    }

    #[must_use]
    pub fn last_scores(&self) -> Option<Streaks> {
        self.events().into_iter().rev().find_map(|event| match event {
            PresenterEvent::Scores(streaks) => Some(streaks),
            _ => None,
        })
    }

    #[must_use]
    pub fn last_question(&self) -> Option<QuestionView> {
        self.events().into_iter().rev().find_map(|event| match event {
            PresenterEvent::Question(view) => Some(view),
            _ => None,
        })
    }

    /// Marks applied since the last rendered question.
    #[must_use]
    pub fn marks(&self) -> Vec<(usize, ChoiceMark)> {
        let events = self.events();
        let start = events
            .iter()
            .rposition(|event| matches!(event, PresenterEvent::Question(_)))
            .map_or(0, |pos| pos + 1);
        events[start..]
            .iter()
            .filter_map(|event| match event {
                PresenterEvent::Mark(index, mark) => Some((*index, *mark)),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn failures(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                PresenterEvent::Failure(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: PresenterEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Presenter for RecordingPresenter {
    fn show_screen(&self, screen: Screen) {
        self.push(PresenterEvent::Screen(screen));
    }

    fn render_scores(&self, streaks: Streaks) {
        self.push(PresenterEvent::Scores(streaks));
    }

    fn render_question(&self, view: &QuestionView) {
        self.push(PresenterEvent::Question(view.clone()));
    }

    fn disable_choices(&self) {
        self.push(PresenterEvent::ChoicesDisabled);
    }

    fn mark_choice(&self, index: usize, mark: ChoiceMark) {
        self.push(PresenterEvent::Mark(index, mark));
    }

    fn show_feedback(&self, feedback: Feedback) {
        self.push(PresenterEvent::Feedback(feedback));
    }

    fn notify_failure(&self, message: &str) {
        self.push(PresenterEvent::Failure(message.to_string()));
    }

    fn render_game_over(&self, streaks: Streaks) {
        self.push(PresenterEvent::GameOver(streaks));
    }
}
