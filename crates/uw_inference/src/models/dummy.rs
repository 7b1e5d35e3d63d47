use std::fmt;

use uw_core::{GeneratedImage, GenerativeModel, GroundingChunk, ImageRequest, Result, TextRequest, TextResponse};

use super::Config;
use crate::prompt::{IMAGE_PROMPT_SEPARATOR, PERSPECTIVES_JSON_SEPARATOR, PULL_QUOTE_SEPARATOR, TIMELINE_DAYS};

/// Offline stand-in that answers every prompt with canned, well-formed text.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new(_config: Option<&Config>) -> Result<Self> {
        Ok(Self)
    }

    fn topic_of(prompt: &str) -> &str {
        prompt
            .split("Topic to Summarize: \"")
            .nth(1)
            .and_then(|rest| rest.split('"').next())
            .unwrap_or("the war")
    }

    fn briefing(topic: &str) -> String {
        format!(
            "Fighting and diplomacy around {topic} continued this week.\n\
             Officials on all sides traded statements about the next phase of the war.\n\
             {pq}\nOfficials on all sides traded statements about the next phase of the war.\n\
             {ip}\nA quiet city street at dawn, documentary style\n\
             {pj}\n[{{\"textToHighlight\": \"the next phase of the war\", \"perspectives\": {{\
             \"left\": \"Stresses humanitarian costs.\", \
             \"center\": \"Reports the official positions.\", \
             \"right\": \"Questions the strategy.\"}}}}]",
            topic = topic,
            pq = PULL_QUOTE_SEPARATOR,
            ip = IMAGE_PROMPT_SEPARATOR,
            pj = PERSPECTIVES_JSON_SEPARATOR,
        )
    }

    fn timeline() -> String {
        let today = chrono::Utc::now().date_naive();
        let points: Vec<serde_json::Value> = (0..TIMELINE_DAYS)
            .rev()
            .map(|offset| {
                let date = today - chrono::Duration::days(i64::from(offset));
                serde_json::json!({
                    "date": date.format("%Y-%m-%d").to_string(),
                    "us": 10 + (offset % 7),
                    "eu": 20 + (offset % 5),
                })
            })
            .collect();
        serde_json::Value::Array(points).to_string()
    }
}

#[async_trait::async_trait]
impl GenerativeModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn generate_text(&self, request: &TextRequest) -> Result<TextResponse> {
        let prompt = request.prompt.as_str();
        let text = if prompt.contains(PERSPECTIVES_JSON_SEPARATOR) {
            Self::briefing(Self::topic_of(prompt))
        } else if prompt.contains("\"date\"") {
            Self::timeline()
        } else if prompt.contains("{\"us\"") {
            r#"{"us": 14, "eu": 27}"#.to_string()
        } else {
            "Coverage from this group concentrated on frontline developments and the politics of military aid.".to_string()
        };

        Ok(TextResponse {
            text: Some(text),
            grounding_chunks: vec![GroundingChunk {
                uri: Some("https://example.org/briefing".to_string()),
                title: Some("Example briefing source".to_string()),
            }],
        })
    }

    async fn generate_images(&self, _request: &ImageRequest) -> Result<Vec<GeneratedImage>> {
        Ok(Vec::new())
    }
}
