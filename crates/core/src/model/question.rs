use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::text::decode_entities;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors raised while validating a fetched question.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text is empty")]
    EmptyText,
    #[error("correct answer is empty")]
    EmptyCorrectAnswer,
    #[error("question has no incorrect answers")]
    NoIncorrectAnswers,
    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),
}

//
// ─── DIFFICULTY ───────────────────────────────────────────────────────────────
//

/// Difficulty tier reported by the question provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Lowercase identifier, also used as a CSS class hook.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Upper-case label shown on the difficulty badge.
    #[must_use]
    pub fn badge_label(self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }
}

impl FromStr for Difficulty {
    type Err = QuestionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(QuestionError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// Raw question fields as delivered by the provider, still entity-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionDraft {
    pub text: String,
    pub category: String,
    pub difficulty: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

impl QuestionDraft {
    /// Decode HTML entities and validate the draft into a `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the text or correct answer is blank, no
    /// incorrect answers are present, or the difficulty is not recognised.
    pub fn validate(self) -> Result<Question, QuestionError> {
        let difficulty = self.difficulty.parse::<Difficulty>()?;

        let text = decode_entities(&self.text);
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }

        let correct_answer = decode_entities(&self.correct_answer);
        if correct_answer.trim().is_empty() {
            return Err(QuestionError::EmptyCorrectAnswer);
        }

        if self.incorrect_answers.is_empty() {
            return Err(QuestionError::NoIncorrectAnswers);
        }
        let incorrect_answers = self
            .incorrect_answers
            .iter()
            .map(|answer| decode_entities(answer))
            .collect();

        Ok(Question {
            text,
            category: decode_entities(&self.category),
            difficulty,
            correct_answer,
            incorrect_answers,
        })
    }
}

/// A single multiple-choice trivia question with decoded text.
///
/// Immutable once built; a session holds one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    category: String,
    difficulty: Difficulty,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}

impl Question {
    /// Build a question from already-decoded parts.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` under the same rules as `QuestionDraft::validate`.
    pub fn new(
        text: impl Into<String>,
        category: impl Into<String>,
        difficulty: Difficulty,
        correct_answer: impl Into<String>,
        incorrect_answers: Vec<String>,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        let correct_answer = correct_answer.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if correct_answer.trim().is_empty() {
            return Err(QuestionError::EmptyCorrectAnswer);
        }
        if incorrect_answers.is_empty() {
            return Err(QuestionError::NoIncorrectAnswers);
        }
        Ok(Self {
            text,
            category: category.into(),
            difficulty,
            correct_answer,
            incorrect_answers,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn incorrect_answers(&self) -> &[String] {
        &self.incorrect_answers
    }

    /// Exact comparison against the decoded correct answer.
    #[must_use]
    pub fn is_correct(&self, choice: &str) -> bool {
        self.correct_answer == choice
    }

    /// Correct answer first, followed by the incorrect answers in provider order.
    #[must_use]
    pub fn all_answers(&self) -> Vec<String> {
        let mut answers = Vec::with_capacity(self.incorrect_answers.len() + 1);
        answers.push(self.correct_answer.clone());
        answers.extend(self.incorrect_answers.iter().cloned());
        answers
    }
}
