use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRequest {
    pub prompt: String,
    /// Let the model ground its answer with web search results.
    pub search_grounding: bool,
}

impl TextRequest {
    pub fn grounded(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            search_grounding: true,
        }
    }
}

/// A web citation attached to a generated answer. Either field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingChunk {
    pub uri: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextResponse {
    pub text: Option<String>,
    pub grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub prompt: String,
    pub number_of_images: u32,
    pub mime_type: String,
    pub aspect_ratio: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Base64 encoded image bytes, as returned by the provider.
    pub bytes_base64: String,
    pub mime_type: String,
}

#[async_trait]
pub trait GenerativeModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Generate text for a prompt
    async fn generate_text(&self, request: &TextRequest) -> Result<TextResponse>;

    /// Generate zero or more images for a prompt
    async fn generate_images(&self, request: &ImageRequest) -> Result<Vec<GeneratedImage>>;
}
