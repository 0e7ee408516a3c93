use crate::model::{AnswerChoices, Question, Streaks};

/// The screen currently presented to the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Screen {
    #[default]
    Start,
    Loading,
    Question,
    GameOver,
}

/// Session epoch. Bumped by every session start so pending work from an
/// older session can recognise itself as stale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    #[must_use]
    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// The question on screen together with its display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveQuestion {
    pub question: Question,
    pub choices: AnswerChoices,
}

/// All mutable state of one player's session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    streaks: Streaks,
    is_answering: bool,
    screen: Screen,
    generation: Generation,
    active: Option<ActiveQuestion>,
}

impl SessionState {
    /// Start-screen state with a best streak loaded from storage.
    #[must_use]
    pub fn new(best_streak: u32) -> Self {
        Self {
            streaks: Streaks::with_best(best_streak),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn streaks(&self) -> Streaks {
        self.streaks
    }

    #[must_use]
    pub fn current_streak(&self) -> u32 {
        self.streaks.current()
    }

    #[must_use]
    pub fn best_streak(&self) -> u32 {
        self.streaks.best()
    }

    #[must_use]
    pub fn is_answering(&self) -> bool {
        self.is_answering
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub fn active(&self) -> Option<&ActiveQuestion> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn is_current(&self, generation: Generation) -> bool {
        self.generation == generation
    }

    /// Return to the start screen after (re)loading the persisted best.
    ///
    /// The best streak never drops below what this state already holds, and
    /// the generation moves on so pending work from before is dropped.
    pub fn reset_to_start(&mut self, stored_best: u32) {
        let best = self.streaks.best().max(stored_best);
        self.streaks = Streaks::with_best(best);
        self.generation = self.generation.next();
        self.screen = Screen::Start;
        self.is_answering = false;
        self.active = None;
    }

    /// Reset the current streak and open a new generation.
    pub fn begin_session(&mut self) -> Generation {
        self.streaks.reset_current();
        self.generation = self.generation.next();
        self.generation
    }

    /// Enter the loading screen, dropping the previous question and latch.
    pub fn begin_loading(&mut self) {
        self.screen = Screen::Loading;
        self.is_answering = false;
        self.active = None;
    }

    /// Show a freshly fetched question. Returns `false` if `generation` is stale.
    pub fn present(&mut self, generation: Generation, active: ActiveQuestion) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.active = Some(active);
        self.is_answering = false;
        self.screen = Screen::Question;
        true
    }

    /// Abort loading back to the start screen. Returns `false` if `generation` is stale.
    pub fn fail_loading(&mut self, generation: Generation) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.active = None;
        self.is_answering = false;
        self.screen = Screen::Start;
        true
    }

    /// Engage the answer latch.
    ///
    /// Returns the question being answered, or `None` when the latch is
    /// already set or nothing is on screen.
    pub fn latch_answer(&mut self) -> Option<&ActiveQuestion> {
        if self.is_answering || self.screen != Screen::Question {
            return None;
        }
        let active = self.active.as_ref()?;
        self.is_answering = true;
        Some(active)
    }

    /// Count a correct answer. Returns `true` when this set a new best.
    pub fn record_correct(&mut self) -> bool {
        self.streaks.record_correct()
    }

    /// Move to the game-over screen. Returns `false` if `generation` is stale.
    pub fn finish(&mut self, generation: Generation) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.screen = Screen::GameOver;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Difficulty;

    fn active() -> ActiveQuestion {
        let question = Question::new(
            "2 + 2?",
            "Math",
            Difficulty::Easy,
            "4",
            vec!["3".into(), "5".into(), "22".into()],
        )
        .unwrap();
        let choices = AnswerChoices::in_order(&question);
        ActiveQuestion { question, choices }
    }

    #[test]
    fn latch_allows_a_single_answer() {
        let mut state = SessionState::new(0);
        let generation = state.begin_session();
        state.begin_loading();
        assert!(state.latch_answer().is_none());

        assert!(state.present(generation, active()));
        assert!(state.latch_answer().is_some());
        assert!(state.latch_answer().is_none());
        assert!(state.is_answering());
    }

    #[test]
    fn stale_generation_is_ignored() {
        let mut state = SessionState::new(3);
        let old = state.begin_session();
        state.begin_loading();
        let new = state.begin_session();
        assert_ne!(old, new);

        assert!(!state.present(old, active()));
        assert!(!state.fail_loading(old));
        assert!(!state.finish(old));
        assert_eq!(state.screen(), Screen::Loading);
        assert_eq!(state.best_streak(), 3);
    }

    #[test]
    fn reset_to_start_never_lowers_best() {
        let mut state = SessionState::new(5);
        state.reset_to_start(2);
        assert_eq!(state.best_streak(), 5);
        state.reset_to_start(9);
        assert_eq!(state.best_streak(), 9);
        assert_eq!(state.screen(), Screen::Start);
    }

    #[test]
    fn begin_session_resets_current_only() {
        let mut state = SessionState::new(1);
        state.begin_session();
        assert!(state.record_correct());
        assert!(state.record_correct());
        state.begin_session();
        assert_eq!(state.current_streak(), 0);
        assert_eq!(state.best_streak(), 2);
    }
}
