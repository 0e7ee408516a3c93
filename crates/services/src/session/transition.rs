use std::time::Duration;

use trivia_core::model::Generation;

use super::controller::LoadOutcome;

/// Fixed visual-feedback pauses before moving on from an answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedbackDelays {
    pub after_correct: Duration,
    pub after_incorrect: Duration,
}

impl Default for FeedbackDelays {
    fn default() -> Self {
        Self {
            after_correct: Duration::from_millis(1500),
            after_incorrect: Duration::from_millis(2000),
        }
    }
}

impl FeedbackDelays {
    /// No pauses at all. Handy for headless runs.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            after_correct: Duration::ZERO,
            after_incorrect: Duration::ZERO,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionStep {
    NextQuestion,
    GameOver,
}

/// A delayed step owed by an answered question.
///
/// Carries the generation it was scheduled under; once a newer session has
/// started the step is dropped instead of applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledTransition {
    pub generation: Generation,
    pub delay: Duration,
    pub step: TransitionStep,
}

#[derive(Debug, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The next question load ran to completion (or failure).
    Loaded(LoadOutcome),
    GameOver,
    /// A newer session superseded this transition.
    Stale,
}
