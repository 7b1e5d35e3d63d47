use uw_core::{Error, Highlight, Result};

use crate::prompt::{IMAGE_PROMPT_SEPARATOR, PERSPECTIVES_JSON_SEPARATOR, PULL_QUOTE_SEPARATOR};

/// The parts of a briefing response. Missing parts degrade to `None` or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedResponse {
    pub summary: String,
    pub pull_quote: Option<String>,
    pub image_prompt: Option<String>,
    pub highlights: Vec<Highlight>,
}

/// The `index`-th piece of `text` split on `separator`.
fn piece<'a>(text: &'a str, separator: &str, index: usize) -> Option<&'a str> {
    text.split(separator).nth(index)
}

fn non_empty(piece: Option<&str>) -> Option<String> {
    piece.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Removes a Markdown code fence (```json ... ```) around a JSON payload.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop the info string ("json") on the opening line
    let body = match body.find('\n') {
        Some(newline) => &body[newline + 1..],
        None => body,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Parses the highlights array, reporting why it was rejected.
pub fn parse_highlights(json: &str) -> Result<Vec<Highlight>> {
    serde_json::from_str(strip_code_fence(json)).map_err(|e| Error::MalformedHighlights(e.to_string()))
}

/// Splits a raw briefing response into its parts. Never fails.
pub fn parse_response(raw: &str) -> ParsedResponse {
    let text_part = piece(raw, PERSPECTIVES_JSON_SEPARATOR, 0).unwrap_or_default();
    let json_part = piece(raw, PERSPECTIVES_JSON_SEPARATOR, 1);

    let mut parsed = ParsedResponse::default();

    if text_part.contains(IMAGE_PROMPT_SEPARATOR) && text_part.contains(PULL_QUOTE_SEPARATOR) {
        let summary_and_quote = piece(text_part, IMAGE_PROMPT_SEPARATOR, 0).unwrap_or_default();
        parsed.image_prompt = non_empty(piece(text_part, IMAGE_PROMPT_SEPARATOR, 1));
        parsed.summary = piece(summary_and_quote, PULL_QUOTE_SEPARATOR, 0)
            .unwrap_or_default()
            .trim()
            .to_string();
        parsed.pull_quote = non_empty(piece(summary_and_quote, PULL_QUOTE_SEPARATOR, 1));
    } else {
        tracing::warn!("Separators not found in response, proceeding without pull quote or image");
        parsed.summary = text_part.trim().to_string();
    }

    if let Some(json) = json_part {
        match parse_highlights(json) {
            Ok(highlights) => parsed.highlights = highlights,
            Err(e) => tracing::error!("Failed to parse perspectives JSON: {}", e),
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use uw_core::Perspective;

    fn sample_highlights() -> Vec<Highlight> {
        vec![Highlight {
            text_to_highlight: "grain corridor".to_string(),
            perspectives: Perspective {
                left: "Humanitarian framing.".to_string(),
                center: "Market framing.".to_string(),
                right: "Security framing.".to_string(),
            },
        }]
    }

    #[test]
    fn test_all_parts_are_recovered() {
        let highlights = sample_highlights();
        let raw = format!(
            "  Paragraph one.\n\nParagraph two about the grain corridor.  {}\n The quote. \n{}\n A ship at sea \n{}\n{}",
            PULL_QUOTE_SEPARATOR,
            IMAGE_PROMPT_SEPARATOR,
            PERSPECTIVES_JSON_SEPARATOR,
            serde_json::to_string(&highlights).unwrap()
        );

        let parsed = parse_response(&raw);
        assert_eq!(parsed.summary, "Paragraph one.\n\nParagraph two about the grain corridor.");
        assert_eq!(parsed.pull_quote.as_deref(), Some("The quote."));
        assert_eq!(parsed.image_prompt.as_deref(), Some("A ship at sea"));
        assert_eq!(parsed.highlights, highlights);
    }

    #[test]
    fn test_missing_separators_fall_back_to_whole_text() {
        let raw = "  Only a summary, no structure at all.\n";
        let parsed = parse_response(raw);
        assert_eq!(parsed.summary, raw.trim());
        assert_eq!(parsed.pull_quote, None);
        assert_eq!(parsed.image_prompt, None);
        assert!(parsed.highlights.is_empty());
    }

    #[test]
    fn test_single_separator_is_not_enough() {
        let raw = format!("Summary. {} Quote without image prompt.", PULL_QUOTE_SEPARATOR);
        let parsed = parse_response(&raw);
        assert_eq!(parsed.summary, raw.trim());
        assert_eq!(parsed.pull_quote, None);
    }

    #[test]
    fn test_malformed_json_keeps_text() {
        let raw = format!(
            "Summary.{}Quote.{}Prompt.{}{{not json",
            PULL_QUOTE_SEPARATOR, IMAGE_PROMPT_SEPARATOR, PERSPECTIVES_JSON_SEPARATOR
        );
        let parsed = parse_response(&raw);
        assert_eq!(parsed.summary, "Summary.");
        assert_eq!(parsed.pull_quote.as_deref(), Some("Quote."));
        assert!(parsed.highlights.is_empty());
    }

    #[test]
    fn test_highlights_without_text_separators() {
        let raw = format!("Plain summary.\n{}\n[]", PERSPECTIVES_JSON_SEPARATOR);
        let parsed = parse_response(&raw);
        assert_eq!(parsed.summary, "Plain summary.");
        assert!(parsed.highlights.is_empty());
    }

    #[test]
    fn test_fenced_json_is_accepted() {
        let json = format!("```json\n{}\n```", serde_json::to_string(&sample_highlights()).unwrap());
        assert_eq!(parse_highlights(&json).unwrap(), sample_highlights());
        assert!(matches!(parse_highlights("{not json"), Err(Error::MalformedHighlights(_))));
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let raw = format!("A.{}B.{}C.{}[]", PULL_QUOTE_SEPARATOR, IMAGE_PROMPT_SEPARATOR, PERSPECTIVES_JSON_SEPARATOR);
        assert_eq!(parse_response(&raw), parse_response(&raw));
        assert_eq!(parse_response(""), ParsedResponse::default());
    }
}
