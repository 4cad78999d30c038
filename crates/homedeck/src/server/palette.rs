//! Command palette endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::palette::{CommandPalette, PaletteEntry};
use crate::server::error::ApiError;
use crate::server::ServerState;

/// Palette actions beyond tools and links. Keyboard navigation itself is
/// shell-side state; the engine owns the entry list and the filter.
fn actions() -> Vec<(String, String, Vec<String>)> {
    vec![
        (
            "settings".to_string(),
            "Open Settings".to_string(),
            vec!["settings".into(), "preferences".into(), "config".into()],
        ),
        (
            "theme".to_string(),
            "Toggle Dark Mode".to_string(),
            vec!["dark".into(), "light".into(), "theme".into(), "mode".into()],
        ),
        (
            "shortcuts".to_string(),
            "Keyboard Shortcuts".to_string(),
            vec!["shortcuts".into(), "hotkeys".into(), "keyboard".into()],
        ),
    ]
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaletteQueryRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaletteQueryResponse {
    pub entries: Vec<PaletteEntry>,
    pub count: usize,
}

#[utoipa::path(
    post,
    path = "/palette/query",
    tag = "palette",
    request_body = PaletteQueryRequest,
    responses((status = 200, body = PaletteQueryResponse))
)]
pub(crate) async fn query(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<PaletteQueryRequest>,
) -> Result<Json<PaletteQueryResponse>, ApiError> {
    let controller = state.controller.lock().expect("controller lock");
    let mut palette = CommandPalette::build(controller.registry(), &[], &actions());
    let entries: Vec<PaletteEntry> = palette
        .filter(&payload.query)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(PaletteQueryResponse {
        count: entries.len(),
        entries,
    }))
}
