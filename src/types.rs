use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of history items the server returns per page.
pub const PAGE_SIZE: usize = 50;

/// Minimum trimmed input length accepted for classification.
pub const MIN_INPUT_CHARS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    /// A label outside the known set. Rendered like neutral.
    Unknown(String),
}

impl Sentiment {
    pub fn as_api_str(&self) -> &str {
        match self {
            Sentiment::Positive => "POSITIVE",
            Sentiment::Negative => "NEGATIVE",
            Sentiment::Neutral => "NEUTRAL",
            Sentiment::Unknown(label) => label,
        }
    }
}

impl From<String> for Sentiment {
    fn from(label: String) -> Self {
        match label.as_str() {
            "POSITIVE" => Sentiment::Positive,
            "NEGATIVE" => Sentiment::Negative,
            "NEUTRAL" => Sentiment::Neutral,
            _ => Sentiment::Unknown(label),
        }
    }
}

impl From<Sentiment> for String {
    fn from(sentiment: Sentiment) -> Self {
        sentiment.as_api_str().to_string()
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_str())
    }
}

/// Body of `POST /analyze`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    pub text: String,
}

/// Successful `POST /analyze` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub text: String,
    pub clean_text: String,
    pub sentiment: Sentiment,
}

/// Error body the server may attach to a failed request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Response of the `GET /` health probe
#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// One previously classified text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: i64,
    pub text: String,
    pub sentiment: Sentiment,
    /// ISO-8601, as sent by the server (with or without an offset).
    pub timestamp: String,
}

impl HistoryItem {
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.timestamp) {
            return Some(dt.naive_local());
        }
        NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S%.f").ok()
    }

    /// `HH:MM:SS dd/mm/YYYY`, or the raw timestamp if it does not parse.
    pub fn display_timestamp(&self) -> String {
        match self.parsed_timestamp() {
            Some(ts) => ts.format("%H:%M:%S %d/%m/%Y").to_string(),
            None => self.timestamp.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_parse() {
        let result: AnalysisResult = serde_json::from_str(
            r#"{"text":"Hom nay vui","clean_text":"hôm nay vui","sentiment":"POSITIVE"}"#,
        )
        .unwrap();
        assert_eq!(result.sentiment, Sentiment::Positive);
        assert_eq!(result.clean_text, "hôm nay vui");
    }

    #[test]
    fn unknown_label_does_not_fail() {
        let item: HistoryItem = serde_json::from_str(
            r#"{"id":3,"text":"x","sentiment":"MIXED","timestamp":"2024-05-01T10:00:00"}"#,
        )
        .unwrap();
        assert_eq!(item.sentiment, Sentiment::Unknown("MIXED".to_string()));
        assert_eq!(item.sentiment.to_string(), "MIXED");
    }

    #[test]
    fn sentiment_serializes_as_label() {
        let json = serde_json::to_string(&Sentiment::Negative).unwrap();
        assert_eq!(json, r#""NEGATIVE""#);
    }

    #[test]
    fn naive_timestamp_with_fraction() {
        let item = HistoryItem {
            id: 1,
            text: "t".into(),
            sentiment: Sentiment::Neutral,
            timestamp: "2024-05-01T10:11:12.345678".into(),
        };
        assert_eq!(item.display_timestamp(), "10:11:12 01/05/2024");
    }

    #[test]
    fn rfc3339_timestamp() {
        let item = HistoryItem {
            id: 1,
            text: "t".into(),
            sentiment: Sentiment::Neutral,
            timestamp: "2024-05-01T10:11:12+07:00".into(),
        };
        assert_eq!(item.display_timestamp(), "10:11:12 01/05/2024");
    }

    #[test]
    fn garbage_timestamp_falls_back_to_raw() {
        let item = HistoryItem {
            id: 1,
            text: "t".into(),
            sentiment: Sentiment::Neutral,
            timestamp: "yesterday".into(),
        };
        assert_eq!(item.display_timestamp(), "yesterday");
    }

    #[test]
    fn error_body_without_error_field() {
        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.error.is_none());
    }
}
