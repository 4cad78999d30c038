//! English dictionary lookup via dictionaryapi.dev.

use moka::sync::Cache;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use utoipa::ToSchema;

use crate::error::{CoreError, CoreResult};
use crate::integrations::http_client;

const LOOKUP_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";
const FETCH_TIMEOUT_SECS: u64 = 10;
const CACHE_TTL_SECS: u64 = 3600;
const MAX_DEFINITIONS: usize = 3;

/// Shown when the word is missing or the service is unreachable.
pub const FALLBACK: &str = "Word not found or error occurred.";

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryEntry {
    pub word: String,
    pub phonetic: Option<String>,
    pub meanings: Vec<Meaning>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    pub part_of_speech: String,
    pub definitions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    word: String,
    phonetic: Option<String>,
    #[serde(default)]
    meanings: Vec<RawMeaning>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMeaning {
    part_of_speech: String,
    #[serde(default)]
    definitions: Vec<RawDefinition>,
}

#[derive(Debug, Deserialize)]
struct RawDefinition {
    definition: String,
}

fn trim_entry(raw: RawEntry) -> DictionaryEntry {
    DictionaryEntry {
        word: raw.word,
        phonetic: raw.phonetic,
        meanings: raw
            .meanings
            .into_iter()
            .map(|m| Meaning {
                part_of_speech: m.part_of_speech,
                definitions: m
                    .definitions
                    .into_iter()
                    .take(MAX_DEFINITIONS)
                    .map(|d| d.definition)
                    .collect(),
            })
            .collect(),
    }
}

/// The upstream request URL for a word; the sync half of the tool.
pub fn lookup_url(word: &str) -> CoreResult<String> {
    let word = word.trim().to_lowercase();
    if word.is_empty() {
        return Err(CoreError::InvalidInput("empty word".to_string()));
    }
    Ok(format!("{LOOKUP_URL}/{}", urlencoding::encode(&word)))
}

pub struct DictionaryService {
    cache: Cache<String, DictionaryEntry>,
}

impl DictionaryService {
    pub fn new() -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(256)
                .time_to_live(Duration::from_secs(CACHE_TTL_SECS))
                .build(),
        }
    }

    pub async fn lookup(&self, word: &str) -> CoreResult<DictionaryEntry> {
        let word = word.trim().to_lowercase();
        if word.is_empty() {
            return Err(CoreError::InvalidInput("empty word".to_string()));
        }
        if let Some(hit) = self.cache.get(&word) {
            return Ok(hit);
        }
        let entry = self.fetch(&word).await?;
        self.cache.insert(word, entry.clone());
        Ok(entry)
    }

    async fn fetch(&self, word: &str) -> CoreResult<DictionaryEntry> {
        let client = http_client(FETCH_TIMEOUT_SECS)?;
        let url = lookup_url(word)?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| CoreError::Upstream(format!("dictionary fetch failed: {e}")))?;
        if !response.status().is_success() {
            return Err(CoreError::Upstream(format!(
                "dictionary lookup for {word} returned {}",
                response.status()
            )));
        }
        let entries: Vec<RawEntry> = response
            .json()
            .await
            .map_err(|e| CoreError::Upstream(format!("dictionary decode failed: {e}")))?;
        entries
            .into_iter()
            .next()
            .map(trim_entry)
            .ok_or_else(|| CoreError::Upstream(format!("no dictionary entry for {word}")))
    }
}

impl Default for DictionaryService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_entry_parses_and_trims() {
        let raw = r#"[{
            "word": "toolbox",
            "phonetic": "/ˈtuːlbɒks/",
            "meanings": [{
                "partOfSpeech": "noun",
                "definitions": [
                    {"definition": "a box for tools"},
                    {"definition": "second"},
                    {"definition": "third"},
                    {"definition": "fourth, dropped"}
                ]
            }]
        }]"#;
        let entries: Vec<RawEntry> = serde_json::from_str(raw).expect("parse");
        let entry = trim_entry(entries.into_iter().next().unwrap());
        assert_eq!(entry.word, "toolbox");
        assert_eq!(entry.phonetic.as_deref(), Some("/ˈtuːlbɒks/"));
        assert_eq!(entry.meanings.len(), 1);
        assert_eq!(entry.meanings[0].part_of_speech, "noun");
        assert_eq!(entry.meanings[0].definitions.len(), MAX_DEFINITIONS);
    }

    #[test]
    fn missing_optional_fields_tolerated() {
        let raw = r#"[{"word": "x"}]"#;
        let entries: Vec<RawEntry> = serde_json::from_str(raw).expect("parse");
        let entry = trim_entry(entries.into_iter().next().unwrap());
        assert!(entry.phonetic.is_none());
        assert!(entry.meanings.is_empty());
    }

    #[tokio::test]
    async fn empty_word_rejected() {
        let service = DictionaryService::new();
        assert!(service.lookup("  ").await.is_err());
    }

    #[test]
    fn lookup_url_normalizes_word() {
        assert_eq!(
            lookup_url("  Rust ").unwrap(),
            "https://api.dictionaryapi.dev/api/v2/entries/en/rust"
        );
        assert!(lookup_url("").is_err());
    }
}
