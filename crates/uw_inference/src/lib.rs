use std::fmt;
use std::str::FromStr;

use uw_core::Error;

pub mod aggregate;
pub mod briefing;
pub mod focus;
pub mod models;
pub mod parser;
pub mod prompt;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-3.0-generate-002";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelKind {
    #[default]
    Gemini,
    /// Canned offline answers, for demos and tests.
    Dummy,
}

impl FromStr for ModelKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gemini" => Ok(ModelKind::Gemini),
            "dummy" => Ok(ModelKind::Dummy),
            other => Err(Error::Provider(format!(
                "Unknown model: {}. Available models: gemini (default), dummy",
                other
            ))),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::Gemini => f.write_str("gemini"),
            ModelKind::Dummy => f.write_str("dummy"),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: ModelKind,
    pub text_model: String,
    pub image_model: String,
    pub base_url: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: ModelKind::default(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

pub mod prelude {
    pub use super::aggregate::{fetch_all_summaries, Digest};
    pub use super::briefing::Briefer;
    pub use super::focus::{FocusController, FocusSnapshot};
    pub use super::models::create_model;
    pub use super::{Config, ModelKind};
    pub use uw_core::{Error, Leaning, Result, SummaryData};
}

pub use models::create_model;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_kind_parsing() {
        assert_eq!("Gemini".parse::<ModelKind>().unwrap(), ModelKind::Gemini);
        assert_eq!("dummy".parse::<ModelKind>().unwrap(), ModelKind::Dummy);
        assert!("ollama".parse::<ModelKind>().is_err());
    }

    #[test]
    fn test_config_debug_redacts_key() {
        let config = Config {
            api_key: Some("secret".to_string()),
            ..Config::default()
        };
        assert!(!format!("{:?}", config).contains("secret"));
    }
}
