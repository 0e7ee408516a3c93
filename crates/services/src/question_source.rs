use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use trivia_core::model::{Endpoint, Question, QuestionDraft};

use crate::config::QuestionSourceConfig;
use crate::error::{ConfigError, FetchFailure};

/// Provider of one randomized multiple-choice question per call.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch a single question.
    ///
    /// # Errors
    ///
    /// Returns `FetchFailure` for transport errors, non-success provider
    /// codes, empty result sets and malformed payloads.
    async fn fetch_question(&self) -> Result<Question, FetchFailure>;
}

//
// ─── OPEN TRIVIA DB ───────────────────────────────────────────────────────────
//

/// HTTP client for the Open Trivia DB `api.php` endpoint.
#[derive(Clone)]
pub struct OpenTdbSource {
    client: Client,
    endpoint: Endpoint,
}

impl OpenTdbSource {
    /// # Errors
    ///
    /// Returns `ConfigError::HttpClient` if the HTTP client cannot be built.
    pub fn new(config: &QuestionSourceConfig) -> Result<Self, ConfigError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

#[async_trait]
impl QuestionSource for OpenTdbSource {
    async fn fetch_question(&self) -> Result<Question, FetchFailure> {
        debug!(endpoint = %self.endpoint, "requesting question");
        let response = self.client.get(self.endpoint.url().clone()).send().await?;

        if !response.status().is_success() {
            return Err(FetchFailure::HttpStatus(response.status().as_u16()));
        }

        let body = response.bytes().await?;
        parse_response(&body)
    }
}

/// Decode an Open Trivia DB response body into the first question it carries.
///
/// # Errors
///
/// Returns `FetchFailure::Malformed` for undecodable JSON,
/// `FetchFailure::ResponseCode` for any code other than 0,
/// `FetchFailure::Empty` when no results are present, and
/// `FetchFailure::InvalidQuestion` when the question fails validation.
pub fn parse_response(body: &[u8]) -> Result<Question, FetchFailure> {
    let payload: ApiResponse =
        serde_json::from_slice(body).map_err(|err| FetchFailure::Malformed(err.to_string()))?;

    if payload.response_code != 0 {
        return Err(FetchFailure::ResponseCode(payload.response_code));
    }

    let raw = payload
        .results
        .into_iter()
        .next()
        .ok_or(FetchFailure::Empty)?;

    let question = QuestionDraft {
        text: raw.question,
        category: raw.category,
        difficulty: raw.difficulty,
        correct_answer: raw.correct_answer,
        incorrect_answers: raw.incorrect_answers,
    }
    .validate()?;
    Ok(question)
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    response_code: i64,
    #[serde(default)]
    results: Vec<ApiQuestion>,
}

#[derive(Debug, Deserialize)]
struct ApiQuestion {
    category: String,
    difficulty: String,
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}

//
// ─── SCRIPTED SOURCE ──────────────────────────────────────────────────────────
//

struct ScriptedReply {
    delay: Duration,
    result: Result<Question, FetchFailure>,
}

/// Question source that replays queued results. For tests and demos.
///
/// An exhausted script answers with `FetchFailure::Empty`.
#[derive(Default)]
pub struct ScriptedQuestionSource {
    replies: Mutex<VecDeque<ScriptedReply>>,
}

impl ScriptedQuestionSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply that resolves immediately.
    pub fn push(&self, result: Result<Question, FetchFailure>) {
        self.push_delayed(result, Duration::ZERO);
    }

    /// Queue a reply that resolves after `delay` of (tokio) time.
    pub fn push_delayed(&self, result: Result<Question, FetchFailure>, delay: Duration) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(ScriptedReply { delay, result });
        }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.replies.lock().map_or(0, |replies| replies.len())
    }
}

#[async_trait]
impl QuestionSource for ScriptedQuestionSource {
    async fn fetch_question(&self) -> Result<Question, FetchFailure> {
        let reply = self
            .replies
            .lock()
            .map_err(|err| FetchFailure::Transport(err.to_string()))?
            .pop_front();
        let Some(reply) = reply else {
            return Err(FetchFailure::Empty);
        };
        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        reply.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trivia_core::model::Difficulty;

    const SAMPLE: &str = r#"{
        "response_code": 0,
        "results": [{
            "type": "multiple",
            "difficulty": "hard",
            "category": "Entertainment: Video Games",
            "question": "In &quot;Pok&eacute;mon&quot;, what type is Pikachu?",
            "correct_answer": "Electric",
            "incorrect_answers": ["Fire", "Water", "Rock &amp; Roll"]
        }]
    }"#;

    #[test]
    fn parses_and_decodes_first_result() {
        let question = parse_response(SAMPLE.as_bytes()).unwrap();
        assert_eq!(question.text(), "In \"Pokémon\", what type is Pikachu?");
        assert_eq!(question.difficulty(), Difficulty::Hard);
        assert_eq!(question.correct_answer(), "Electric");
        assert_eq!(question.incorrect_answers()[2], "Rock & Roll");
    }

    #[test]
    fn non_zero_response_code_is_a_failure() {
        let body = br#"{"response_code": 1, "results": []}"#;
        assert_eq!(parse_response(body), Err(FetchFailure::ResponseCode(1)));
    }

    #[test]
    fn empty_results_are_a_failure() {
        let body = br#"{"response_code": 0, "results": []}"#;
        assert_eq!(parse_response(body), Err(FetchFailure::Empty));

        let missing = br#"{"response_code": 0}"#;
        assert_eq!(parse_response(missing), Err(FetchFailure::Empty));
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            parse_response(b"<html>down</html>"),
            Err(FetchFailure::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn scripted_source_replays_then_runs_dry() {
        let source = ScriptedQuestionSource::new();
        source.push(Err(FetchFailure::Transport("offline".into())));
        assert_eq!(source.remaining(), 1);

        assert!(matches!(
            source.fetch_question().await,
            Err(FetchFailure::Transport(_))
        ));
        assert_eq!(source.fetch_question().await, Err(FetchFailure::Empty));
    }
}
