use thiserror::Error;

/// Message shown when no API key was supplied for the Gemini client.
pub const NOT_CONFIGURED_MESSAGE: &str =
    "The Google Gemini API client is not initialized. Please ensure the API key is configured correctly.";

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    NotConfigured(String),

    #[error("{0}")]
    EmptyResponse(String),

    #[error("{0}")]
    SafetyBlocked(String),

    #[error("Malformed highlights: {0}")]
    MalformedHighlights(String),

    #[error("Malformed data: {0}")]
    MalformedData(String),

    /// Anything the provider reported, passed through verbatim.
    #[error("{0}")]
    Provider(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    pub fn not_configured() -> Self {
        Error::NotConfigured(NOT_CONFIGURED_MESSAGE.to_string())
    }

    /// Provider filters report blocked content with a `SAFETY` reason code.
    pub fn is_safety_block(&self) -> bool {
        matches!(self, Error::SafetyBlocked(_)) || self.to_string().contains("SAFETY")
    }

    /// Replaces a safety rejection with `message`; every other error is returned as is.
    pub fn classify_safety(self, message: &str) -> Self {
        if self.is_safety_block() {
            Error::SafetyBlocked(message.to_string())
        } else {
            self
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
