//! Search bar: query → engine URL. Opening the URL is the shell's job.

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    Google,
    DuckDuckGo,
    Bing,
    Yahoo,
}

impl Engine {
    pub fn parse(name: &str) -> CoreResult<Self> {
        match name.to_lowercase().as_str() {
            "google" => Ok(Engine::Google),
            "duckduckgo" => Ok(Engine::DuckDuckGo),
            "bing" => Ok(Engine::Bing),
            "yahoo" => Ok(Engine::Yahoo),
            other => Err(CoreError::InvalidInput(format!(
                "unknown search engine: {other}"
            ))),
        }
    }
}

/// Enter in the search box searches with the default engine.
pub const DEFAULT_ENGINE: Engine = Engine::Google;

/// Build the search URL for a non-empty query.
pub fn search_url(engine: Engine, query: &str) -> CoreResult<String> {
    let query = query.trim();
    if query.is_empty() {
        return Err(CoreError::InvalidInput("empty search query".to_string()));
    }
    let encoded = urlencoding::encode(query);
    Ok(match engine {
        Engine::Google => format!("https://www.google.com/search?q={encoded}"),
        Engine::DuckDuckGo => format!("https://duckduckgo.com/?q={encoded}"),
        Engine::Bing => format!("https://www.bing.com/search?q={encoded}"),
        Engine::Yahoo => format!("https://search.yahoo.com/search?p={encoded}"),
    })
}
