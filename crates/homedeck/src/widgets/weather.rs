//! Weather widget backed by the Open-Meteo forecast API.

use moka::sync::Cache;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use utoipa::ToSchema;

use crate::error::{CoreError, CoreResult};
use crate::integrations::http_client;

/// Default location when the shell supplies no coordinates.
pub const DEFAULT_LAT: f64 = 47.4979;
pub const DEFAULT_LON: f64 = 19.0402;

/// Rendered when the upstream call fails for any reason.
pub const FALLBACK: &str = "🌤️ --°C";

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const CACHE_TTL_SECS: u64 = 600;
const FETCH_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeatherView {
    pub emoji: String,
    pub temperature_c: Option<i32>,
    pub rendered: String,
}

impl WeatherView {
    fn fallback() -> Self {
        Self {
            emoji: "🌤️".to_string(),
            temperature_c: None,
            rendered: FALLBACK.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    temperature_2m: f64,
    weather_code: u32,
}

/// WMO weather interpretation codes, collapsed to an emoji.
pub fn weather_emoji(code: u32) -> &'static str {
    match code {
        0 => "☀️",
        1..=3 => "⛅",
        4..=48 => "🌫️",
        49..=67 => "🌧️",
        68..=77 => "🌨️",
        78..=82 => "🌧️",
        83..=86 => "🌨️",
        87..=99 => "⛈️",
        _ => "🌤️",
    }
}

fn render(code: u32, temperature: f64) -> WeatherView {
    let rounded = temperature.round() as i32;
    let emoji = weather_emoji(code);
    WeatherView {
        emoji: emoji.to_string(),
        temperature_c: Some(rounded),
        rendered: format!("{emoji} {rounded}°C"),
    }
}

/// Fetches and caches current conditions. One instance lives in the server
/// state; the cache keeps repeated dashboard refreshes off the network.
pub struct WeatherService {
    cache: Cache<(i64, i64), WeatherView>,
}

impl WeatherService {
    pub fn new() -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(64)
                .time_to_live(Duration::from_secs(CACHE_TTL_SECS))
                .build(),
        }
    }

    /// Current conditions for a location; never errors — upstream failure
    /// renders the static fallback, per the widget's contract.
    pub async fn current(&self, lat: f64, lon: f64) -> WeatherView {
        let key = cache_key(lat, lon);
        if let Some(hit) = self.cache.get(&key) {
            return hit;
        }
        match self.fetch(lat, lon).await {
            Ok(view) => {
                self.cache.insert(key, view.clone());
                view
            }
            Err(error) => {
                tracing::debug!(%error, lat, lon, "weather fetch failed, using fallback");
                WeatherView::fallback()
            }
        }
    }

    async fn fetch(&self, lat: f64, lon: f64) -> CoreResult<WeatherView> {
        let client = http_client(FETCH_TIMEOUT_SECS)?;
        let response = client
            .get(FORECAST_URL)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("current", "temperature_2m,weather_code".to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await
            .map_err(|e| CoreError::Upstream(format!("weather fetch failed: {e}")))?;
        let body: ForecastResponse = response
            .json()
            .await
            .map_err(|e| CoreError::Upstream(format!("weather decode failed: {e}")))?;
        Ok(render(body.current.weather_code, body.current.temperature_2m))
    }
}

impl Default for WeatherService {
    fn default() -> Self {
        Self::new()
    }
}

// Two decimals is plenty: the forecast grid is coarser than that.
fn cache_key(lat: f64, lon: f64) -> (i64, i64) {
    ((lat * 100.0).round() as i64, (lon * 100.0).round() as i64)
}
