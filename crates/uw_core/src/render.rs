//! View-model helpers shared by the web API and the CLI.
//!
//! Everything here is pure: it turns a [`SummaryData`] into pieces a front end
//! can render without re-implementing highlight or search matching.

use serde::{Deserialize, Serialize};

use crate::types::{Highlight, Perspective, SummaryData};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    Plain { text: String },
    Highlight { text: String, perspectives: Perspective },
    /// Text matching the active search term.
    Match { text: String },
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain { text } | Segment::Highlight { text, .. } | Segment::Match { text } => text,
        }
    }
}

pub type Paragraph = Vec<Segment>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    pub data: SummaryData,
    pub brief: String,
    pub paragraphs: Vec<Paragraph>,
    pub search_hits: usize,
}

impl SummaryView {
    pub fn new(data: SummaryData, search_term: Option<&str>) -> Self {
        let term = search_term.map(str::trim).filter(|t| !t.is_empty());
        let mut paragraphs = paragraphs(&data.summary, &data.highlights);
        let mut search_hits = 0;
        if let Some(term) = term {
            for paragraph in paragraphs.iter_mut() {
                let mut marked = Vec::with_capacity(paragraph.len());
                for segment in paragraph.drain(..) {
                    match segment {
                        Segment::Plain { text } => {
                            let pieces = mark_search_term(&text, term);
                            search_hits += pieces.iter().filter(|s| matches!(s, Segment::Match { .. })).count();
                            marked.extend(pieces);
                        }
                        other => {
                            search_hits += count_matches(other.text(), term);
                            marked.push(other);
                        }
                    }
                }
                *paragraph = marked;
            }
        }
        Self {
            brief: brief_summary(&data),
            data,
            paragraphs,
            search_hits,
        }
    }
}

/// The pull quote when there is one, otherwise the summary's first sentence.
pub fn brief_summary(data: &SummaryData) -> String {
    match &data.pull_quote {
        Some(quote) => quote.clone(),
        None => {
            let first = data.summary.split('.').next().unwrap_or_default();
            format!("{}.", first)
        }
    }
}

/// Splits a summary into non-blank lines and marks every highlight occurring in each.
pub fn paragraphs(summary: &str, highlights: &[Highlight]) -> Vec<Paragraph> {
    summary
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| segment_paragraph(line, highlights))
        .collect()
}

fn segment_paragraph(paragraph: &str, highlights: &[Highlight]) -> Paragraph {
    let candidates: Vec<&Highlight> = highlights
        .iter()
        .filter(|h| !h.text_to_highlight.is_empty() && paragraph.contains(&h.text_to_highlight))
        .collect();

    let mut segments = Vec::new();
    let mut pos = 0;
    while pos < paragraph.len() {
        let rest = &paragraph[pos..];
        // leftmost match wins, longest text on ties
        let next = candidates
            .iter()
            .filter_map(|h| rest.find(&h.text_to_highlight).map(|at| (at, *h)))
            .min_by(|(a, ha), (b, hb)| {
                a.cmp(b)
                    .then(hb.text_to_highlight.len().cmp(&ha.text_to_highlight.len()))
            });

        match next {
            Some((at, highlight)) => {
                if at > 0 {
                    segments.push(Segment::Plain { text: rest[..at].to_string() });
                }
                let end = at + highlight.text_to_highlight.len();
                segments.push(Segment::Highlight {
                    text: rest[at..end].to_string(),
                    perspectives: highlight.perspectives.clone(),
                });
                pos += end;
            }
            None => {
                segments.push(Segment::Plain { text: rest.to_string() });
                break;
            }
        }
    }
    segments
}

/// Byte length of `needle` matched case-insensitively at the start of `haystack`.
fn match_len_at(haystack: &str, needle: &str) -> Option<usize> {
    let mut chars = haystack.char_indices();
    for expected in needle.chars() {
        let (_, actual) = chars.next()?;
        if !actual.to_lowercase().eq(expected.to_lowercase()) {
            return None;
        }
    }
    Some(chars.next().map(|(i, _)| i).unwrap_or(haystack.len()))
}

/// Cuts `text` into plain and matching segments; matching ignores case.
pub fn mark_search_term(text: &str, term: &str) -> Vec<Segment> {
    if term.is_empty() {
        return vec![Segment::Plain { text: text.to_string() }];
    }

    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut pos = 0;
    while pos < text.len() {
        if let Some(len) = match_len_at(&text[pos..], term) {
            if plain_start < pos {
                segments.push(Segment::Plain { text: text[plain_start..pos].to_string() });
            }
            segments.push(Segment::Match { text: text[pos..pos + len].to_string() });
            pos += len;
            plain_start = pos;
        } else {
            pos += text[pos..].chars().next().map(char::len_utf8).unwrap_or(1);
        }
    }
    if plain_start < text.len() {
        segments.push(Segment::Plain { text: text[plain_start..].to_string() });
    }
    segments
}

fn count_matches(text: &str, term: &str) -> usize {
    mark_search_term(text, term)
        .iter()
        .filter(|s| matches!(s, Segment::Match { .. }))
        .count()
}

fn contains_ignore_case(text: &str, term: &str) -> bool {
    text.char_indices().any(|(i, _)| match_len_at(&text[i..], term).is_some())
}

/// Whether a briefing should stay visible for the given search term.
pub fn matches_search(data: &SummaryData, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return true;
    }
    contains_ignore_case(&data.topic, term)
        || contains_ignore_case(&data.summary, term)
        || data
            .pull_quote
            .as_deref()
            .map(|q| contains_ignore_case(q, term))
            .unwrap_or(false)
}
