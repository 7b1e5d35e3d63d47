use std::sync::Arc;

use uw_core::{GenerativeModel, Result};

pub use crate::{Config, ModelKind};

pub mod dummy;
pub mod gemini;

pub use dummy::DummyModel;
pub use gemini::GeminiModel;

/// Builds the shared model client once, at startup.
pub fn create_model(config: &Config) -> Result<Arc<dyn GenerativeModel>> {
    let model: Arc<dyn GenerativeModel> = match config.model {
        ModelKind::Gemini => Arc::new(GeminiModel::new(config)?),
        ModelKind::Dummy => Arc::new(DummyModel::new(Some(config))?),
    };
    tracing::debug!("Created {} model", model.name());
    Ok(model)
}
