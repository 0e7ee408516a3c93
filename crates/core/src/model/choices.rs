use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::model::Question;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChoiceError {
    #[error("choice index {index} is out of range for {len} choices")]
    OutOfRange { index: usize, len: usize },
    #[error("no displayed choice matches {0:?}")]
    UnknownChoice(String),
}

/// Answer choices for one question, in the order they are displayed.
///
/// The order is fixed once shuffled and lives as long as the question does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerChoices {
    items: Vec<String>,
    correct: String,
}

impl AnswerChoices {
    /// Shuffle the correct and incorrect answers with a uniform Fisher–Yates pass.
    #[must_use]
    pub fn shuffled<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> Self {
        let mut items = question.all_answers();
        items.shuffle(rng);
        Self {
            items,
            correct: question.correct_answer().to_string(),
        }
    }

    /// Keep the provider order (correct answer first). Useful for fixtures.
    #[must_use]
    pub fn in_order(question: &Question) -> Self {
        Self {
            items: question.all_answers(),
            correct: question.correct_answer().to_string(),
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Text shown on the control at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ChoiceError::OutOfRange` for an index past the last control.
    pub fn get(&self, index: usize) -> Result<&str, ChoiceError> {
        self.items
            .get(index)
            .map(String::as_str)
            .ok_or(ChoiceError::OutOfRange {
                index,
                len: self.items.len(),
            })
    }

    /// Index of the first control displaying `text`.
    ///
    /// # Errors
    ///
    /// Returns `ChoiceError::UnknownChoice` when no control shows that text.
    pub fn position(&self, text: &str) -> Result<usize, ChoiceError> {
        self.items
            .iter()
            .position(|item| item == text)
            .ok_or_else(|| ChoiceError::UnknownChoice(text.to_string()))
    }

    /// Every control whose text equals the correct answer.
    #[must_use]
    pub fn correct_indices(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| **item == self.correct)
            .map(|(index, _)| index)
            .collect()
    }
}
