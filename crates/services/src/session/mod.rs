mod controller;
mod transition;

pub use controller::{AnswerResult, LoadOutcome, SessionController, Verdict};
pub use transition::{FeedbackDelays, ScheduledTransition, TransitionOutcome, TransitionStep};
