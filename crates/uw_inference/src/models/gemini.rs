use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;
use uw_core::{
    Error, GeneratedImage, GenerativeModel, GroundingChunk, ImageRequest, Result, TextRequest, TextResponse,
};

use crate::Config;

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct GoogleSearch {}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<WireGroundingChunk>,
}

#[derive(Deserialize)]
struct WireGroundingChunk {
    web: Option<WebChunk>,
}

#[derive(Deserialize)]
struct WebChunk {
    uri: Option<String>,
    title: Option<String>,
}

#[derive(Serialize)]
struct ImageInstance {
    prompt: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OutputOptions {
    mime_type: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageParameters {
    sample_count: u32,
    aspect_ratio: String,
    output_options: OutputOptions,
}

#[derive(Serialize)]
struct PredictRequest {
    instances: Vec<ImageInstance>,
    parameters: ImageParameters,
}

#[derive(Deserialize, Default)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
    rai_filtered_reason: Option<String>,
}

/// REST client for the Gemini text and Imagen image endpoints.
pub struct GeminiModel {
    client: Client,
    api_key: String,
    base_url: Url,
    text_model: String,
    image_model: String,
}

impl GeminiModel {
    /// Fails with `NotConfigured` when no API key was supplied.
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(Error::not_configured)?
            .to_string();

        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|e| Error::InvalidUrl(format!("{}: {}", base, e)))?;

        Ok(Self {
            client: Client::new(),
            api_key,
            base_url,
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
        })
    }

    fn endpoint(&self, model: &str, method: &str) -> Result<Url> {
        self.base_url
            .join(&format!("models/{}:{}", model, method))
            .map_err(|e| Error::InvalidUrl(e.to_string()))
    }

    async fn post<B: Serialize, R: for<'de> Deserialize<'de>>(&self, url: Url, body: &B) -> Result<R> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Provider(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Provider(format!("HTTP {}: {}", status, body)));
        }
        Ok(response.json::<R>().await?)
    }
}

impl fmt::Debug for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url.as_str())
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .finish()
    }
}

#[async_trait]
impl GenerativeModel for GeminiModel {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn generate_text(&self, request: &TextRequest) -> Result<TextResponse> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: request.prompt.clone(),
                }],
            }],
            tools: if request.search_grounding {
                vec![Tool {
                    google_search: GoogleSearch {},
                }]
            } else {
                vec![]
            },
        };

        let url = self.endpoint(&self.text_model, "generateContent")?;
        let response: GenerateContentResponse = self.post(url, &body).await?;

        if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(Error::Provider(format!("Prompt blocked: {}", reason)));
        }

        let Some(candidate) = response.candidates.into_iter().next() else {
            return Ok(TextResponse::default());
        };

        let text: String = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter(|p| !p.thought)
                    .filter_map(|p| p.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            if let Some(reason) = candidate.finish_reason.as_deref().filter(|r| *r != "STOP") {
                return Err(Error::Provider(format!("Response blocked: {}", reason)));
            }
        }

        let grounding_chunks = candidate
            .grounding_metadata
            .map(|m| m.grounding_chunks)
            .unwrap_or_default()
            .into_iter()
            .map(|chunk| match chunk.web {
                Some(web) => GroundingChunk {
                    uri: web.uri,
                    title: web.title,
                },
                None => GroundingChunk::default(),
            })
            .collect();

        Ok(TextResponse {
            text: if text.is_empty() { None } else { Some(text) },
            grounding_chunks,
        })
    }

    async fn generate_images(&self, request: &ImageRequest) -> Result<Vec<GeneratedImage>> {
        let body = PredictRequest {
            instances: vec![ImageInstance {
                prompt: request.prompt.clone(),
            }],
            parameters: ImageParameters {
                sample_count: request.number_of_images,
                aspect_ratio: request.aspect_ratio.clone(),
                output_options: OutputOptions {
                    mime_type: request.mime_type.clone(),
                },
            },
        };

        let url = self.endpoint(&self.image_model, "predict")?;
        let response: PredictResponse = self.post(url, &body).await?;

        let mut images = Vec::with_capacity(response.predictions.len());
        for prediction in response.predictions {
            match prediction.bytes_base64_encoded {
                Some(bytes) => images.push(GeneratedImage {
                    bytes_base64: bytes,
                    mime_type: prediction.mime_type.unwrap_or_else(|| request.mime_type.clone()),
                }),
                None => {
                    if let Some(reason) = prediction.rai_filtered_reason {
                        tracing::warn!("Image filtered by provider: {}", reason);
                    }
                }
            }
        }
        Ok(images)
    }
}
