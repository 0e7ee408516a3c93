use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use services::{ChoiceMark, Feedback, Presenter, QuestionView};
use trivia_core::model::{Screen, Streaks};

/// Everything the trivia screens render, as last told by the controller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TriviaVm {
    pub screen: Screen,
    pub scores: Streaks,
    pub question: Option<QuestionView>,
    pub marks: Vec<Option<ChoiceMark>>,
    pub choices_disabled: bool,
    pub feedback: Option<Feedback>,
    pub notice: Option<String>,
    pub final_scores: Streaks,
}

impl TriviaVm {
    #[must_use]
    pub fn mark_for(&self, index: usize) -> Option<ChoiceMark> {
        self.marks.get(index).copied().flatten()
    }

    /// CSS classes for the answer button at `index`.
    #[must_use]
    pub fn choice_class(&self, index: usize) -> String {
        match self.mark_for(index) {
            Some(mark) => format!("answer-btn {}", mark.css_class()),
            None => "answer-btn".to_string(),
        }
    }
}

type Refresh = Arc<dyn Fn() + Send + Sync>;

/// `Presenter` that keeps a `TriviaVm` and asks the UI to re-render on change.
#[derive(Default)]
pub struct ViewModelPresenter {
    vm: Mutex<TriviaVm>,
    refresh: Mutex<Option<Refresh>>,
}

impl ViewModelPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the callback that schedules a re-render.
    pub fn attach_refresh(&self, refresh: Refresh) {
        *self.refresh.lock().unwrap_or_else(PoisonError::into_inner) = Some(refresh);
    }

    #[must_use]
    pub fn snapshot(&self) -> TriviaVm {
        self.lock_vm().clone()
    }

    pub fn dismiss_notice(&self) {
        self.update(|vm| vm.notice = None);
    }

    fn lock_vm(&self) -> MutexGuard<'_, TriviaVm> {
        self.vm.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, apply: impl FnOnce(&mut TriviaVm)) {
        apply(&mut self.lock_vm());
        let refresh = self
            .refresh
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(refresh) = refresh {
            refresh();
        }
    }
}

impl Presenter for ViewModelPresenter {
    fn show_screen(&self, screen: Screen) {
        self.update(|vm| {
            vm.screen = screen;
            if screen == Screen::Loading {
                vm.notice = None;
            }
        });
    }

    fn render_scores(&self, streaks: Streaks) {
        self.update(|vm| vm.scores = streaks);
    }

    fn render_question(&self, view: &QuestionView) {
        self.update(|vm| {
            vm.marks = vec![None; view.choices.len()];
            vm.question = Some(view.clone());
            vm.choices_disabled = false;
            vm.feedback = None;
        });
    }

    fn disable_choices(&self) {
        self.update(|vm| vm.choices_disabled = true);
    }

    fn mark_choice(&self, index: usize, mark: ChoiceMark) {
        self.update(|vm| {
            if let Some(slot) = vm.marks.get_mut(index) {
                *slot = Some(mark);
            }
        });
    }

    fn show_feedback(&self, feedback: Feedback) {
        self.update(|vm| vm.feedback = Some(feedback));
    }

    fn notify_failure(&self, message: &str) {
        self.update(|vm| vm.notice = Some(message.to_string()));
    }

    fn render_game_over(&self, streaks: Streaks) {
        self.update(|vm| vm.final_scores = streaks);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use trivia_core::model::Difficulty;

    fn view() -> QuestionView {
        QuestionView {
            category: "Geography".into(),
            difficulty: Difficulty::Easy,
            text: "Capital of France?".into(),
            choices: vec!["London".into(), "Paris".into(), "Berlin".into()],
        }
    }

    #[test]
    fn new_question_clears_previous_feedback() {
        let presenter = ViewModelPresenter::new();
        presenter.render_question(&view());
        presenter.disable_choices();
        presenter.mark_choice(0, ChoiceMark::Incorrect);
        presenter.mark_choice(1, ChoiceMark::Correct);
        presenter.show_feedback(Feedback::Incorrect);

        let vm = presenter.snapshot();
        assert!(vm.choices_disabled);
        assert_eq!(vm.choice_class(0), "answer-btn incorrect");
        assert_eq!(vm.choice_class(1), "answer-btn correct");
        assert_eq!(vm.choice_class(2), "answer-btn");

        presenter.render_question(&view());
        let vm = presenter.snapshot();
        assert!(!vm.choices_disabled);
        assert!(vm.feedback.is_none());
        assert_eq!(vm.marks, vec![None, None, None]);
    }

    #[test]
    fn every_update_requests_a_refresh() {
        let presenter = ViewModelPresenter::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        presenter.attach_refresh(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        presenter.show_screen(Screen::Loading);
        presenter.render_scores(Streaks::with_best(4));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(presenter.snapshot().scores.best(), 4);
    }

    #[test]
    fn loading_clears_a_stale_notice() {
        let presenter = ViewModelPresenter::new();
        presenter.notify_failure("offline");
        assert_eq!(presenter.snapshot().notice.as_deref(), Some("offline"));
        presenter.show_screen(Screen::Loading);
        assert!(presenter.snapshot().notice.is_none());
    }
}
