use futures::future::join_all;
use serde::{Deserialize, Serialize};
use uw_core::{FetchState, SummaryData};

use crate::briefing::Briefer;

/// Outcome of one briefing cycle across all topics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Digest {
    pub summaries: Vec<SummaryData>,
    /// Set only when every requested topic failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Digest {
    pub fn into_state(self) -> FetchState<Vec<SummaryData>> {
        match self.error {
            Some(message) => FetchState::Error(message),
            None => FetchState::Success(self.summaries),
        }
    }
}

/// Fetches every topic concurrently and waits for all of them to settle.
///
/// A failing topic never hides the others; the first failure becomes the
/// page-level error only when nothing succeeded.
pub async fn fetch_all_summaries<S: AsRef<str>>(briefer: &Briefer, topics: &[S]) -> Digest {
    let results = join_all(topics.iter().map(|topic| briefer.fetch_summary(topic.as_ref()))).await;

    let mut summaries = Vec::with_capacity(results.len());
    let mut first_error = None;
    let mut failed = 0;
    for (topic, result) in topics.iter().zip(results) {
        match result {
            Ok(summary) => summaries.push(summary),
            Err(e) => {
                failed += 1;
                tracing::error!("Error for topic \"{}\": {}", topic.as_ref(), e);
                first_error.get_or_insert_with(|| e.to_string());
            }
        }
    }

    if failed > 0 {
        tracing::error!("{} summary/summaries failed to load.", failed);
    }
    tracing::info!("✨ Loaded {}/{} summaries", summaries.len(), topics.len());

    let error = if summaries.is_empty() {
        first_error.map(|message| {
            if message.is_empty() {
                "Failed to load any news summaries.".to_string()
            } else {
                message
            }
        })
    } else {
        None
    };

    Digest { summaries, error }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{IMAGE_PROMPT_SEPARATOR, PERSPECTIVES_JSON_SEPARATOR, PULL_QUOTE_SEPARATOR};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;
    use uw_core::{Error, GeneratedImage, GenerativeModel, ImageRequest, Result, TextRequest, TextResponse};

    /// Fails for listed topics, answers the others with a small structured briefing.
    #[derive(Debug, Default)]
    struct TopicModel {
        failures: HashMap<String, String>,
    }

    impl TopicModel {
        fn failing(failures: &[(&str, &str)]) -> Self {
            Self {
                failures: failures.iter().map(|(t, m)| (t.to_string(), m.to_string())).collect(),
            }
        }
    }

    #[async_trait]
    impl GenerativeModel for TopicModel {
        fn name(&self) -> &str {
            "topic-mock"
        }

        async fn generate_text(&self, request: &TextRequest) -> Result<TextResponse> {
            for (topic, message) in &self.failures {
                if request.prompt.contains(&format!("\"{}\"", topic)) {
                    return Err(Error::Provider(message.clone()));
                }
            }
            Ok(TextResponse {
                text: Some(format!(
                    "Summary.{}Quote.{}Prompt{}[]",
                    PULL_QUOTE_SEPARATOR, IMAGE_PROMPT_SEPARATOR, PERSPECTIVES_JSON_SEPARATOR
                )),
                grounding_chunks: vec![],
            })
        }

        async fn generate_images(&self, _request: &ImageRequest) -> Result<Vec<GeneratedImage>> {
            Ok(vec![])
        }
    }

    const TOPICS: [&str; 5] = ["t1", "t2", "t3", "t4", "t5"];

    #[tokio::test]
    async fn test_partial_failure_keeps_successes() {
        let briefer = Briefer::new(Arc::new(TopicModel::failing(&[("t2", "quota"), ("t4", "timeout")])));
        let digest = fetch_all_summaries(&briefer, &TOPICS).await;

        let topics: Vec<&str> = digest.summaries.iter().map(|s| s.topic.as_str()).collect();
        assert_eq!(topics, vec!["t1", "t3", "t5"]);
        assert!(digest.error.is_none());
    }

    #[tokio::test]
    async fn test_total_failure_surfaces_first_error() {
        let failures: Vec<(&str, &str)> = vec![("t1", "e1"), ("t2", "e2"), ("t3", "e3"), ("t4", "e4"), ("t5", "e5")];
        let briefer = Briefer::new(Arc::new(TopicModel::failing(&failures)));
        let digest = fetch_all_summaries(&briefer, &TOPICS).await;

        assert!(digest.summaries.is_empty());
        assert_eq!(digest.error.as_deref(), Some("e1"));
        assert!(matches!(digest.into_state(), FetchState::Error(ref m) if m == "e1"));
    }

    #[tokio::test]
    async fn test_no_topics_is_not_an_error() {
        let briefer = Briefer::new(Arc::new(TopicModel::default()));
        let digest = fetch_all_summaries::<&str>(&briefer, &[]).await;
        assert!(digest.summaries.is_empty());
        assert!(digest.error.is_none());
        assert!(matches!(digest.into_state(), FetchState::Success(ref s) if s.is_empty()));
    }

    #[tokio::test]
    async fn test_safety_failure_is_reported_with_user_message() {
        let briefer = Briefer::new(Arc::new(TopicModel::failing(&[("only", "finishReason: SAFETY")])));
        let digest = fetch_all_summaries(&briefer, &["only"]).await;
        assert_eq!(digest.error.as_deref(), Some(crate::briefing::SUMMARY_SAFETY_MESSAGE));
    }
}
