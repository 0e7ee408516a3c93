mod choices;
mod endpoint;
mod question;
mod session;
mod streak;

pub use choices::{AnswerChoices, ChoiceError};
pub use endpoint::{DEFAULT_QUESTION_ENDPOINT, Endpoint, EndpointError};
pub use question::{Difficulty, Question, QuestionDraft, QuestionError};
pub use session::{ActiveQuestion, Generation, Screen, SessionState};
pub use streak::{BEST_STREAK_KEY, Streaks, parse_best_streak};
