use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use trivia_core::model::{
    ActiveQuestion, AnswerChoices, Generation, Screen, SessionState, Streaks,
};

use crate::error::{FetchFailure, SessionError};
use crate::presenter::{ChoiceMark, FETCH_FAILURE_NOTICE, Feedback, Presenter, QuestionView};
use crate::question_source::QuestionSource;
use crate::streak_service::StreakService;

use super::transition::{FeedbackDelays, ScheduledTransition, TransitionOutcome, TransitionStep};

/// How a question load ended.
#[derive(Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Presented,
    Failed(FetchFailure),
    /// A newer session started while the request was in flight.
    Stale,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

/// Result of scoring one answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerResult {
    pub verdict: Verdict,
    pub chosen: usize,
    pub correct_indices: Vec<usize>,
    pub streaks: Streaks,
    pub new_best: bool,
    pub transition: ScheduledTransition,
}

/// Single authority over the quiz session: screens, questions, scoring, streaks.
///
/// Cheap to clone; clones share the same session.
#[derive(Clone)]
pub struct SessionController {
    state: Arc<Mutex<SessionState>>,
    source: Arc<dyn QuestionSource>,
    streaks: StreakService,
    presenter: Arc<dyn Presenter>,
    delays: FeedbackDelays,
    rng: Arc<Mutex<StdRng>>,
}

impl SessionController {
    #[must_use]
    pub fn new(
        source: Arc<dyn QuestionSource>,
        streaks: StreakService,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::default())),
            source,
            streaks,
            presenter,
            delays: FeedbackDelays::default(),
            rng: Arc::new(Mutex::new(StdRng::from_rng(&mut rand::rng()))),
        }
    }

    #[must_use]
    pub fn with_delays(mut self, delays: FeedbackDelays) -> Self {
        self.delays = delays;
        self
    }

    /// Use a seeded shuffle so choice order is reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Arc::new(Mutex::new(StdRng::seed_from_u64(seed)));
        self
    }

    /// Snapshot of the current session state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.lock_state().clone()
    }

    /// Load the persisted best streak and show the start screen.
    pub async fn initialize(&self) -> Streaks {
        let stored = self.streaks.load_best().await;
        let mut state = self.lock_state();
        state.reset_to_start(stored);
        let streaks = state.streaks();
        self.presenter.show_screen(Screen::Start);
        self.presenter.render_scores(streaks);
        streaks
    }

    /// Begin a new session: reset the current streak and load the first question.
    ///
    /// Anything still pending from an earlier session is abandoned.
    pub async fn start_session(&self) -> LoadOutcome {
        let generation = {
            let mut state = self.lock_state();
            let generation = state.begin_session();
            self.presenter.render_scores(state.streaks());
            generation
        };
        info!(generation = generation.value(), "session started");
        self.load_question_for(generation).await
    }

    /// Fetch and show the next question within the current session.
    pub async fn load_question(&self) -> LoadOutcome {
        let generation = self.lock_state().generation();
        self.load_question_for(generation).await
    }

    /// Score an answer by its displayed text.
    ///
    /// Returns `Ok(None)` when the answer is ignored: the latch is already
    /// set or no question is on screen.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Choice` if `choice` is not one of the displayed answers.
    pub async fn submit_answer(&self, choice: &str) -> Result<Option<AnswerResult>, SessionError> {
        let index = {
            let state = self.lock_state();
            if state.is_answering() || state.screen() != Screen::Question {
                return Ok(None);
            }
            let Some(active) = state.active() else {
                return Ok(None);
            };
            active.choices.position(choice)?
        };
        Ok(self.score(index).await)
    }

    /// Score an answer by the index of its control.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Choice` if `index` is past the last control.
    pub async fn submit_choice(&self, index: usize) -> Result<Option<AnswerResult>, SessionError> {
        {
            let state = self.lock_state();
            if state.is_answering() || state.screen() != Screen::Question {
                return Ok(None);
            }
            let Some(active) = state.active() else {
                return Ok(None);
            };
            active.choices.get(index)?;
        }
        Ok(self.score(index).await)
    }

    /// Wait out the feedback delay, then apply the step unless a newer session started.
    pub async fn run_transition(&self, transition: ScheduledTransition) -> TransitionOutcome {
        if !transition.delay.is_zero() {
            tokio::time::sleep(transition.delay).await;
        }
        if !self.lock_state().is_current(transition.generation) {
            debug!(
                generation = transition.generation.value(),
                "dropping stale transition"
            );
            return TransitionOutcome::Stale;
        }
        match transition.step {
            TransitionStep::NextQuestion => {
                TransitionOutcome::Loaded(self.load_question_for(transition.generation).await)
            }
            TransitionStep::GameOver => {
                if self.show_game_over_for(transition.generation) {
                    TransitionOutcome::GameOver
                } else {
                    TransitionOutcome::Stale
                }
            }
        }
    }

    /// Show the game-over screen with the final scores.
    pub fn show_game_over(&self) {
        let generation = self.lock_state().generation();
        self.show_game_over_for(generation);
    }

    fn show_game_over_for(&self, generation: Generation) -> bool {
        let mut state = self.lock_state();
        if !state.finish(generation) {
            return false;
        }
        let streaks = state.streaks();
        self.presenter.render_game_over(streaks);
        self.presenter.show_screen(Screen::GameOver);
        info!(
            streak = streaks.current(),
            best = streaks.best(),
            "game over"
        );
        true
    }

    async fn load_question_for(&self, generation: Generation) -> LoadOutcome {
        {
            let mut state = self.lock_state();
            if !state.is_current(generation) {
                return LoadOutcome::Stale;
            }
            state.begin_loading();
            self.presenter.show_screen(Screen::Loading);
        }

        match self.source.fetch_question().await {
            Ok(question) => {
                let choices = {
                    let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
                    AnswerChoices::shuffled(&question, &mut *rng)
                };
                let view = QuestionView::new(&question, &choices);

                let mut state = self.lock_state();
                if !state.present(generation, ActiveQuestion { question, choices }) {
                    debug!(generation = generation.value(), "dropping stale question");
                    return LoadOutcome::Stale;
                }
                self.presenter.render_question(&view);
                self.presenter.show_screen(Screen::Question);
                LoadOutcome::Presented
            }
            Err(failure) => {
                let mut state = self.lock_state();
                if !state.fail_loading(generation) {
                    debug!(generation = generation.value(), "dropping stale fetch failure");
                    return LoadOutcome::Stale;
                }
                warn!(error = %failure, "failed to load question");
                self.presenter.notify_failure(FETCH_FAILURE_NOTICE);
                self.presenter.show_screen(Screen::Start);
                LoadOutcome::Failed(failure)
            }
        }
    }

    async fn score(&self, index: usize) -> Option<AnswerResult> {
        let result = {
            let mut state = self.lock_state();
            let generation = state.generation();
            let active = state
                .active()
                .filter(|active| active.choices.get(index).is_ok())?
                .clone();
            state.latch_answer()?;
            let chosen = active.choices.get(index).ok()?;
            let correct_indices = active.choices.correct_indices();

            self.presenter.disable_choices();
            if active.question.is_correct(chosen) {
                self.presenter.mark_choice(index, ChoiceMark::Correct);
                self.presenter.show_feedback(Feedback::Correct);
                let new_best = state.record_correct();
                AnswerResult {
                    verdict: Verdict::Correct,
                    chosen: index,
                    correct_indices,
                    streaks: state.streaks(),
                    new_best,
                    transition: ScheduledTransition {
                        generation,
                        delay: self.delays.after_correct,
                        step: TransitionStep::NextQuestion,
                    },
                }
            } else {
                self.presenter.mark_choice(index, ChoiceMark::Incorrect);
                for correct in &correct_indices {
                    self.presenter.mark_choice(*correct, ChoiceMark::Correct);
                }
                self.presenter.show_feedback(Feedback::Incorrect);
                AnswerResult {
                    verdict: Verdict::Incorrect,
                    chosen: index,
                    correct_indices,
                    streaks: state.streaks(),
                    new_best: false,
                    transition: ScheduledTransition {
                        generation,
                        delay: self.delays.after_incorrect,
                        step: TransitionStep::GameOver,
                    },
                }
            }
        };

        if result.new_best {
            info!(best = result.streaks.best(), "new best streak");
            if let Err(err) = self.streaks.save_best(result.streaks.best()).await {
                warn!(error = %err, "failed to persist best streak");
            }
        }

        let state = self.lock_state();
        if state.is_current(result.transition.generation) {
            self.presenter.render_scores(state.streaks());
        }
        drop(state);

        Some(result)
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
