use std::fmt;

use thiserror::Error;
use url::Url;

/// Open Trivia DB request for a single multiple-choice question.
pub const DEFAULT_QUESTION_ENDPOINT: &str = "https://opentdb.com/api.php?amount=1&type=multiple";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EndpointError {
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),
    #[error("unsupported endpoint scheme: {0}")]
    UnsupportedScheme(String),
}

/// Validated HTTP(S) URL of the question provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint(Url);

impl Endpoint {
    /// Parse and validate an endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns `EndpointError` if the URL does not parse or is not http/https.
    pub fn parse(raw: &str) -> Result<Self, EndpointError> {
        let url = Url::parse(raw.trim()).map_err(|_| EndpointError::InvalidUrl(raw.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(Self(url)),
            other => Err(EndpointError::UnsupportedScheme(other.to_string())),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.0
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self(Url::parse(DEFAULT_QUESTION_ENDPOINT).expect("default endpoint should be valid"))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_open_trivia_db() {
        let endpoint = Endpoint::default();
        assert_eq!(endpoint.url().host_str(), Some("opentdb.com"));
        assert!(endpoint.as_str().contains("amount=1"));
    }

    #[test]
    fn rejects_non_http_schemes() {
        assert!(matches!(
            Endpoint::parse("ftp://example.com/api"),
            Err(EndpointError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            Endpoint::parse("not a url"),
            Err(EndpointError::InvalidUrl(_))
        ));
    }
}
