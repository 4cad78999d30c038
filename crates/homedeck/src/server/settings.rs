//! Preference endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::server::error::ApiError;
use crate::server::ServerState;
use crate::settings::Settings;
use crate::storage::docs;

#[utoipa::path(
    get,
    path = "/settings",
    tag = "settings",
    responses((status = 200, body = Settings))
)]
pub(crate) async fn get_settings(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Settings>, ApiError> {
    Ok(Json(*state.settings.lock().await))
}

#[utoipa::path(
    put,
    path = "/settings",
    tag = "settings",
    request_body = Settings,
    responses((status = 200, body = Settings))
)]
pub(crate) async fn put_settings(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<Settings>,
) -> Result<Json<Settings>, ApiError> {
    let mut settings = state.settings.lock().await;
    *settings = payload;
    docs::save(state.storage.as_ref(), &*settings).await?;
    Ok(Json(*settings))
}
