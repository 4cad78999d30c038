//! Home-row widgets and upstream lookups.
//!
//! Weather failures are content, not errors: the route answers 200 with the
//! static fallback, the same way the widget always rendered them.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::integrations::{dictionary, translate};
use crate::server::error::ApiError;
use crate::server::ServerState;
use crate::settings::Language;
use crate::widgets::clock::{self, TodayView};
use crate::widgets::search::{self, Engine};
use crate::widgets::weather::{WeatherView, DEFAULT_LAT, DEFAULT_LON};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct TodayParams {
    /// `hu` or `en`; defaults to the stored preference.
    pub lang: Option<String>,
}

#[utoipa::path(
    get,
    path = "/widgets/today",
    tag = "widgets",
    params(TodayParams),
    responses((status = 200, body = TodayView))
)]
pub(crate) async fn today(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<TodayParams>,
) -> Result<Json<TodayView>, ApiError> {
    let language = match params.lang.as_deref() {
        Some("hu") => Language::Hu,
        Some("en") => Language::En,
        Some(other) => return Err(ApiError::bad_request(format!("unknown language: {other}"))),
        None => state.settings.lock().await.language,
    };
    let today = chrono::Local::now().date_naive();
    Ok(Json(clock::today_view(today, language)))
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct WeatherParams {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[utoipa::path(
    get,
    path = "/widgets/weather",
    tag = "widgets",
    params(WeatherParams),
    responses((status = 200, body = WeatherView))
)]
pub(crate) async fn weather(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<WeatherParams>,
) -> Json<WeatherView> {
    let lat = params.lat.unwrap_or(DEFAULT_LAT);
    let lon = params.lon.unwrap_or(DEFAULT_LON);
    Json(state.weather.current(lat, lon).await)
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub engine: Option<String>,
    pub q: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub url: String,
}

#[utoipa::path(
    get,
    path = "/widgets/search",
    tag = "widgets",
    params(SearchParams),
    responses((status = 200, body = SearchResponse))
)]
pub(crate) async fn search(
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let engine = match params.engine.as_deref() {
        Some(name) => Engine::parse(name)?,
        None => search::DEFAULT_ENGINE,
    };
    let url = search::search_url(engine, &params.q)?;
    Ok(Json(SearchResponse { url }))
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryParams {
    pub word: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DictionaryResponse {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<dictionary::DictionaryEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[utoipa::path(
    get,
    path = "/integrations/dictionary",
    tag = "integrations",
    params(DictionaryParams),
    responses((status = 200, body = DictionaryResponse))
)]
pub(crate) async fn dictionary(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<DictionaryParams>,
) -> Result<Json<DictionaryResponse>, ApiError> {
    match state.dictionary.lookup(&params.word).await {
        Ok(entry) => Ok(Json(DictionaryResponse {
            found: true,
            entry: Some(entry),
            message: None,
        })),
        Err(crate::error::CoreError::Upstream(error)) => {
            tracing::debug!(%error, word = %params.word, "dictionary lookup failed");
            Ok(Json(DictionaryResponse {
                found: false,
                entry: None,
                message: Some(dictionary::FALLBACK.to_string()),
            }))
        }
        Err(other) => Err(other.into()),
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    pub text: String,
    pub pair: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub ok: bool,
    pub translated_text: String,
}

#[utoipa::path(
    post,
    path = "/integrations/translate",
    tag = "integrations",
    request_body = TranslateRequest,
    responses((status = 200, body = TranslateResponse))
)]
pub(crate) async fn translate(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, ApiError> {
    match state.translate.translate(&payload.text, &payload.pair).await {
        Ok(translated) => Ok(Json(TranslateResponse {
            ok: true,
            translated_text: translated,
        })),
        Err(crate::error::CoreError::Upstream(error)) => {
            tracing::debug!(%error, "translation failed");
            Ok(Json(TranslateResponse {
                ok: false,
                translated_text: translate::FALLBACK.to_string(),
            }))
        }
        Err(other) => Err(other.into()),
    }
}
