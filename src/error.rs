//! Error taxonomy shared by both pipelines

/// Message returned to callers for every transport or parse failure.
/// The underlying cause is only written to the operator log.
pub const GENERIC_FAILURE_MESSAGE: &str = "failed to fetch data from the catalog";

/// Result type for scraper operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Error types for scraper operations
#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    /// Required input missing, detected before any network call
    #[error("validation error: {0}")]
    Validation(String),

    /// Well-formed request with nothing extractable (search only)
    #[error("not found: {0}")]
    NotFound(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("parse error: {0}")]
    Parse(String),
}

impl ScrapeError {
    /// Status code carried by the response envelope
    pub fn status_code(&self) -> u16 {
        match self {
            ScrapeError::Validation(_) => 400,
            ScrapeError::NotFound(_) => 404,
            ScrapeError::Transport(_) | ScrapeError::Parse(_) => 500,
        }
    }

    /// Caller-facing message. Upstream detail never leaks through here.
    pub fn public_message(&self) -> String {
        match self {
            ScrapeError::Validation(msg) | ScrapeError::NotFound(msg) => msg.clone(),
            ScrapeError::Transport(_) | ScrapeError::Parse(_) => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    /// True when the error should be logged as an operator-side failure
    pub fn is_internal(&self) -> bool {
        self.status_code() >= 500
    }
}

impl From<reqwest::Error> for ScrapeError {
    fn from(e: reqwest::Error) -> Self {
        ScrapeError::Transport(e.to_string())
    }
}

impl From<url::ParseError> for ScrapeError {
    fn from(e: url::ParseError) -> Self {
        ScrapeError::Transport(format!("invalid url: {}", e))
    }
}

impl From<regex::Error> for ScrapeError {
    fn from(e: regex::Error) -> Self {
        ScrapeError::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ScrapeError::Validation("x".into()).status_code(), 400);
        assert_eq!(ScrapeError::NotFound("x".into()).status_code(), 404);
        assert_eq!(ScrapeError::Transport("x".into()).status_code(), 500);
        assert_eq!(ScrapeError::Parse("x".into()).status_code(), 500);
    }

    #[test]
    fn test_internal_errors_hide_cause() {
        let err = ScrapeError::Transport("dns failure for origin.example".into());
        assert_eq!(err.public_message(), GENERIC_FAILURE_MESSAGE);
        assert!(err.is_internal());

        let err = ScrapeError::Validation("keyword must not be empty".into());
        assert_eq!(err.public_message(), "keyword must not be empty");
        assert!(!err.is_internal());
    }

    #[test]
    fn test_url_error_maps_to_transport() {
        let err: ScrapeError = url::Url::parse("not a url").unwrap_err().into();
        assert_eq!(err.status_code(), 500);
    }
}
