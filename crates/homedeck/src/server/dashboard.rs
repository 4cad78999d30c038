//! Dashboard lifecycle endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::dashboard::DashboardState;
use crate::server::error::ApiError;
use crate::server::ServerState;
use crate::tools::schema::ToolView;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpenToolRequest {
    pub tool_id: String,
}

#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "dashboard",
    responses((status = 200, body = DashboardState))
)]
pub(crate) async fn snapshot(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<DashboardState>, ApiError> {
    let controller = state.controller.lock().expect("controller lock");
    Ok(Json(controller.state().clone()))
}

#[utoipa::path(
    post,
    path = "/dashboard/open",
    tag = "dashboard",
    request_body = OpenToolRequest,
    responses((status = 200, body = ToolView))
)]
pub(crate) async fn open(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<OpenToolRequest>,
) -> Result<Json<ToolView>, ApiError> {
    let mut controller = state.controller.lock().expect("controller lock");
    let view = controller.open(&payload.tool_id);
    Ok(Json(view))
}

#[utoipa::path(
    post,
    path = "/dashboard/close",
    tag = "dashboard",
    responses((status = 200, body = DashboardState))
)]
pub(crate) async fn close(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<DashboardState>, ApiError> {
    let mut controller = state.controller.lock().expect("controller lock");
    controller.close();
    Ok(Json(controller.state().clone()))
}
