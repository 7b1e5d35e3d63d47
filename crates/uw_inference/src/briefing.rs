use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use serde::de::DeserializeOwned;
use uw_core::logging::Logger;
use uw_core::{
    CoverageStats, Error, GenerativeModel, GroundingChunk, ImageRequest, Leaning, Result, Source, SummaryData,
    TextRequest, TimelineDataPoint,
};

use crate::parser::{parse_response, strip_code_fence};
use crate::prompt;

pub const EMPTY_SUMMARY_MESSAGE: &str =
    "The AI returned an empty summary. This might be due to content restrictions or lack of recent news.";
pub const SUMMARY_SAFETY_MESSAGE: &str =
    "The request was blocked due to safety settings. Please try a different topic.";
pub const SAFETY_MESSAGE: &str = "The request was blocked due to safety settings.";
pub const IMAGE_CREDIT: &str = "AI-generated artistic representation of the news.";
pub const UNTITLED_SOURCE: &str = "Untitled Source";

const IMAGE_STYLE: &str = "photorealistic news style, high detail";
const IMAGE_MIME_TYPE: &str = "image/jpeg";
const IMAGE_ASPECT_RATIO: &str = "16:9";

/// Turns grounding citations into sources: empty URIs dropped, first title per URI kept.
pub fn collect_sources(chunks: &[GroundingChunk]) -> Vec<Source> {
    let mut seen = HashSet::new();
    chunks
        .iter()
        .filter_map(|chunk| {
            let uri = chunk.uri.as_deref().unwrap_or_default();
            if uri.is_empty() || !seen.insert(uri.to_string()) {
                return None;
            }
            let title = chunk
                .title
                .as_deref()
                .filter(|t| !t.is_empty())
                .unwrap_or(UNTITLED_SOURCE);
            Some(Source {
                uri: uri.to_string(),
                title: title.to_string(),
            })
        })
        .collect()
}

/// Fetches briefings, focus summaries and coverage figures from one shared model.
#[derive(Clone)]
pub struct Briefer {
    model: Arc<dyn GenerativeModel>,
}

impl fmt::Debug for Briefer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Briefer").field("model", &self.model.name()).finish()
    }
}

impl Briefer {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Summary, pull quote, highlights, sources and (best effort) an image for one topic.
    pub async fn fetch_summary(&self, topic: &str) -> Result<SummaryData> {
        let logger = Logger::new()
            .with_prefix("[summary]".to_string())
            .with_prefix(format!("[{}]", topic));

        self.try_fetch_summary(topic, &logger).await.map_err(|e| {
            logger.error(&format!("Error fetching summary: {}", e));
            e.classify_safety(SUMMARY_SAFETY_MESSAGE)
        })
    }

    async fn try_fetch_summary(&self, topic: &str, logger: &Logger) -> Result<SummaryData> {
        logger.debug("Requesting summary");
        let response = self
            .model
            .generate_text(&TextRequest::grounded(prompt::summary_prompt(topic)))
            .await?;

        let text = response
            .text
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::EmptyResponse(EMPTY_SUMMARY_MESSAGE.to_string()))?;

        let parsed = parse_response(&text);

        let (image_url, image_credit) = match parsed.image_prompt.as_deref() {
            Some(image_prompt) => match self.generate_image(image_prompt).await {
                Ok(Some(url)) => (Some(url), Some(IMAGE_CREDIT.to_string())),
                Ok(None) => (None, None),
                Err(e) => {
                    logger.error(&format!("Failed to generate image: {}", e));
                    (None, None)
                }
            },
            None => (None, None),
        };

        let sources = collect_sources(&response.grounding_chunks);
        logger.info(&format!(
            "Summary ready ({} sources, {} highlights)",
            sources.len(),
            parsed.highlights.len()
        ));

        Ok(SummaryData {
            topic: topic.to_string(),
            summary: parsed.summary,
            sources,
            timestamp: Utc::now(),
            image_url,
            image_credit,
            pull_quote: parsed.pull_quote,
            highlights: parsed.highlights,
        })
    }

    /// A data URL for the first generated image, if the provider returned any.
    async fn generate_image(&self, image_prompt: &str) -> Result<Option<String>> {
        let request = ImageRequest {
            prompt: format!("{}, {}", image_prompt, IMAGE_STYLE),
            number_of_images: 1,
            mime_type: IMAGE_MIME_TYPE.to_string(),
            aspect_ratio: IMAGE_ASPECT_RATIO.to_string(),
        };
        let images = self.model.generate_images(&request).await?;
        Ok(images
            .into_iter()
            .next()
            .map(|image| format!("data:{};base64,{}", IMAGE_MIME_TYPE, image.bytes_base64)))
    }

    /// What one group of outlets has been focusing on lately.
    pub async fn fetch_focus_summary(&self, leaning: Leaning) -> Result<String> {
        let logger = Logger::new().with_prefix(format!("[focus] [{}]", leaning));
        let result = async {
            let response = self
                .model
                .generate_text(&TextRequest::grounded(prompt::focus_prompt(leaning)))
                .await?;
            response
                .text
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .ok_or_else(|| {
                    Error::EmptyResponse(format!("The AI returned an empty summary for {} focus.", leaning))
                })
        }
        .await;

        result.map_err(|e| {
            logger.error(&format!("Error generating focus summary: {}", e));
            e.classify_safety(SAFETY_MESSAGE)
        })
    }

    pub async fn fetch_coverage_stats(&self) -> Result<CoverageStats> {
        let stats: CoverageStats = self.fetch_json("coverage", prompt::coverage_stats_prompt()).await?;
        stats.validate()?;
        Ok(stats)
    }

    pub async fn fetch_coverage_timeline(&self) -> Result<Vec<TimelineDataPoint>> {
        let points: Vec<TimelineDataPoint> = self
            .fetch_json("timeline", prompt::coverage_timeline_prompt(prompt::TIMELINE_DAYS))
            .await?;
        for point in &points {
            point.validate()?;
        }
        Ok(points)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, what: &str, prompt: String) -> Result<T> {
        let result = async {
            let response = self.model.generate_text(&TextRequest::grounded(prompt)).await?;
            let text = response
                .text
                .filter(|t| !t.trim().is_empty())
                .ok_or_else(|| Error::EmptyResponse(format!("The AI returned no {} data.", what)))?;
            serde_json::from_str(strip_code_fence(&text))
                .map_err(|e| Error::MalformedData(format!("Could not read {} data: {}", what, e)))
        }
        .await;

        result.map_err(|e| {
            tracing::error!("Error fetching {} data: {}", what, e);
            e.classify_safety(SAFETY_MESSAGE)
        })
    }
}
