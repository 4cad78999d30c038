//! Text translation via the MyMemory public API.

use moka::sync::Cache;
use serde::Deserialize;
use std::time::Duration;

use crate::error::{CoreError, CoreResult};
use crate::integrations::http_client;

const TRANSLATE_URL: &str = "https://api.mymemory.translated.net/get";
const FETCH_TIMEOUT_SECS: u64 = 15;
const CACHE_TTL_SECS: u64 = 3600;

/// Shown when the service is unreachable.
pub const FALLBACK: &str = "Error connecting to translation service.";

/// The language pairs the translator offers.
pub const SUPPORTED_PAIRS: [&str; 8] = [
    "en|hu", "hu|en", "en|de", "de|en", "en|es", "es|en", "en|fr", "fr|en",
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyMemoryResponse {
    response_status: ResponseStatus,
    response_data: ResponseData,
    #[serde(default)]
    response_details: Option<String>,
}

/// MyMemory reports the status as a number on success and sometimes as a
/// string on error.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResponseStatus {
    Code(u32),
    Text(String),
}

impl ResponseStatus {
    fn is_ok(&self) -> bool {
        matches!(self, ResponseStatus::Code(200))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    translated_text: String,
}

pub fn validate_pair(pair: &str) -> CoreResult<()> {
    if SUPPORTED_PAIRS.contains(&pair) {
        Ok(())
    } else {
        Err(CoreError::InvalidInput(format!(
            "unsupported language pair: {pair}"
        )))
    }
}

/// The upstream request URL for a translation; the sync half of the tool.
pub fn request_url(text: &str, pair: &str) -> CoreResult<String> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CoreError::InvalidInput("empty text".to_string()));
    }
    validate_pair(pair)?;
    Ok(format!(
        "{TRANSLATE_URL}?q={}&langpair={}",
        urlencoding::encode(text),
        urlencoding::encode(pair)
    ))
}

pub struct TranslateService {
    cache: Cache<(String, String), String>,
}

impl TranslateService {
    pub fn new() -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(256)
                .time_to_live(Duration::from_secs(CACHE_TTL_SECS))
                .build(),
        }
    }

    pub async fn translate(&self, text: &str, pair: &str) -> CoreResult<String> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CoreError::InvalidInput("empty text".to_string()));
        }
        validate_pair(pair)?;

        let key = (text.to_string(), pair.to_string());
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit);
        }
        let translated = self.fetch(text, pair).await?;
        self.cache.insert(key, translated.clone());
        Ok(translated)
    }

    async fn fetch(&self, text: &str, pair: &str) -> CoreResult<String> {
        let client = http_client(FETCH_TIMEOUT_SECS)?;
        let response = client
            .get(TRANSLATE_URL)
            .query(&[("q", text), ("langpair", pair)])
            .send()
            .await
            .map_err(|e| CoreError::Upstream(format!("translation fetch failed: {e}")))?;
        let body: MyMemoryResponse = response
            .json()
            .await
            .map_err(|e| CoreError::Upstream(format!("translation decode failed: {e}")))?;
        if !body.response_status.is_ok() {
            let details = body
                .response_details
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(CoreError::Upstream(format!("translation error: {details}")));
        }
        Ok(body.response_data.translated_text)
    }
}

impl Default for TranslateService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_pairs_validate() {
        assert!(validate_pair("en|hu").is_ok());
        assert!(validate_pair("fr|en").is_ok());
        assert!(validate_pair("en|jp").is_err());
    }

    #[test]
    fn success_response_parses() {
        let raw = r#"{
            "responseData": {"translatedText": "szia", "match": 1},
            "responseStatus": 200
        }"#;
        let body: MyMemoryResponse = serde_json::from_str(raw).expect("parse");
        assert!(body.response_status.is_ok());
        assert_eq!(body.response_data.translated_text, "szia");
    }

    #[test]
    fn error_response_parses() {
        let raw = r#"{
            "responseData": {"translatedText": ""},
            "responseStatus": "403",
            "responseDetails": "invalid language pair"
        }"#;
        let body: MyMemoryResponse = serde_json::from_str(raw).expect("parse");
        assert!(!body.response_status.is_ok());
        assert_eq!(body.response_details.as_deref(), Some("invalid language pair"));
    }

    #[tokio::test]
    async fn empty_text_rejected() {
        let service = TranslateService::new();
        assert!(service.translate("", "en|hu").await.is_err());
    }

    #[test]
    fn request_url_encodes_text_and_pair() {
        let url = request_url("jó napot", "hu|en").unwrap();
        assert!(url.starts_with("https://api.mymemory.translated.net/get?q="));
        assert!(url.contains("langpair=hu%7Cen"));
        assert!(request_url("x", "xx|yy").is_err());
    }

    #[tokio::test]
    async fn bad_pair_rejected_before_network() {
        let service = TranslateService::new();
        let err = service.translate("hello", "en|xx").await.expect_err("pair");
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }
}
