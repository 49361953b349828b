use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored association between an original URL and its short code
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Mapping {
    pub url: String,
    pub short: String,
    pub created_at: DateTime<Utc>,
}

/// Request to create a short URL
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub url: String,

    /// Accepted for compatibility with existing clients; the server always
    /// generates the code.
    #[serde(default)]
    pub short: Option<String>,
}

/// Response for a resolved short code
#[derive(Debug, Serialize, Deserialize)]
pub struct ActualUrlResponse {
    #[serde(rename = "actualURL")]
    pub actual_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten_request_ignores_short() {
        let req: ShortenRequest =
            serde_json::from_str(r#"{"url": "https://example.com", "short": "custom"}"#).unwrap();
        assert_eq!(req.url, "https://example.com");
    }

    #[test]
    fn test_shorten_request_requires_url() {
        assert!(serde_json::from_str::<ShortenRequest>(r#"{"short": "x"}"#).is_err());
    }

    #[test]
    fn test_actual_url_field_name() {
        let body = serde_json::to_value(ActualUrlResponse {
            actual_url: "https://example.com".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"actualURL": "https://example.com"}));
    }
}
