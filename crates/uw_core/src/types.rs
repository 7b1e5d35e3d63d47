use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Editorial-bias group used to bucket news outlets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Leaning {
    #[serde(rename = "Left-Leaning")]
    LeftLeaning,
    #[serde(rename = "Center")]
    Center,
    #[serde(rename = "Right-Leaning")]
    RightLeaning,
}

impl Leaning {
    pub const ALL: [Leaning; 3] = [Leaning::LeftLeaning, Leaning::Center, Leaning::RightLeaning];

    pub fn label(&self) -> &'static str {
        match self {
            Leaning::LeftLeaning => "Left-Leaning",
            Leaning::Center => "Center",
            Leaning::RightLeaning => "Right-Leaning",
        }
    }

    /// Outlets in this group, in display order.
    pub fn outlets(&self) -> &'static [&'static str] {
        match self {
            Leaning::LeftLeaning => crate::constants::LEFT_LEANING_OUTLETS,
            Leaning::Center => crate::constants::CENTER_OUTLETS,
            Leaning::RightLeaning => crate::constants::RIGHT_LEANING_OUTLETS,
        }
    }
}

impl fmt::Display for Leaning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Leaning {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "left-leaning" => Ok(Leaning::LeftLeaning),
            "center" | "centre" => Ok(Leaning::Center),
            "right" | "right-leaning" => Ok(Leaning::RightLeaning),
            other => Err(Error::MalformedData(format!("Unknown leaning: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub uri: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Perspective {
    pub left: String,
    pub center: String,
    pub right: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub text_to_highlight: String,
    pub perspectives: Perspective,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryData {
    pub topic: String,
    pub summary: String,
    pub sources: Vec<Source>,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_credit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_quote: Option<String>,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
}

/// Share of US and EU media coverage devoted to the war, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageStats {
    pub us: f64,
    pub eu: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineDataPoint {
    pub date: String,
    pub us: f64,
    pub eu: f64,
}

fn check_percentage(label: &str, value: f64) -> Result<()> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::MalformedData(format!("{} percentage out of range: {}", label, value)))
    }
}

impl CoverageStats {
    pub fn validate(&self) -> Result<()> {
        check_percentage("us", self.us)?;
        check_percentage("eu", self.eu)
    }
}

impl TimelineDataPoint {
    pub fn validate(&self) -> Result<()> {
        check_percentage("us", self.us)
            .and_then(|_| check_percentage("eu", self.eu))
            .map_err(|e| match e {
                Error::MalformedData(message) => Error::MalformedData(format!("{} ({})", message, self.date)),
                other => other,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaning_parsing() {
        assert_eq!("Center".parse::<Leaning>().unwrap(), Leaning::Center);
        assert_eq!("left".parse::<Leaning>().unwrap(), Leaning::LeftLeaning);
        assert_eq!("Right-Leaning".parse::<Leaning>().unwrap(), Leaning::RightLeaning);
        assert!("north".parse::<Leaning>().is_err());
    }

    #[test]
    fn test_leaning_wire_names() {
        let json = serde_json::to_string(&Leaning::LeftLeaning).unwrap();
        assert_eq!(json, "\"Left-Leaning\"");
        let parsed: Leaning = serde_json::from_str("\"Right-Leaning\"").unwrap();
        assert_eq!(parsed, Leaning::RightLeaning);
    }

    #[test]
    fn test_highlight_uses_camel_case() {
        let json = r#"{"textToHighlight":"grain","perspectives":{"left":"l","center":"c","right":"r"}}"#;
        let highlight: Highlight = serde_json::from_str(json).unwrap();
        assert_eq!(highlight.text_to_highlight, "grain");
        assert_eq!(highlight.perspectives.center, "c");
    }

    #[test]
    fn test_coverage_range() {
        assert!(CoverageStats { us: 0.0, eu: 100.0 }.validate().is_ok());
        assert!(CoverageStats { us: 101.0, eu: 3.0 }.validate().is_err());
        let point = TimelineDataPoint { date: "2024-05-01".to_string(), us: 12.0, eu: -1.0 };
        let err = point.validate().unwrap_err();
        assert_eq!(err.to_string(), "Malformed data: eu percentage out of range: -1 (2024-05-01)");
    }
}
