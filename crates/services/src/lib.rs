#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod error;
pub mod presenter;
pub mod question_source;
pub mod session;
pub mod streak_service;

pub use app_services::AppServices;
pub use config::QuestionSourceConfig;
pub use error::{AppServicesError, ConfigError, FetchFailure, SessionError};
pub use presenter::{
    ChoiceMark, FETCH_FAILURE_NOTICE, Feedback, Presenter, PresenterEvent, QuestionView,
    RecordingPresenter,
};
pub use question_source::{OpenTdbSource, QuestionSource, ScriptedQuestionSource};
pub use session::{
    AnswerResult, FeedbackDelays, LoadOutcome, ScheduledTransition, SessionController,
    TransitionOutcome, TransitionStep, Verdict,
};
pub use streak_service::StreakService;
