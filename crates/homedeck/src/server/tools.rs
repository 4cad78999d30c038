//! Tool listing and invocation.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::server::error::ApiError;
use crate::server::ServerState;
use crate::tools::schema::{validate_schema, ExecutionContext, ToolView};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToolListResponse {
    pub tools: Vec<ToolView>,
    pub count: usize,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvokeRequest {
    pub tool_id: String,
    #[serde(default)]
    pub args: serde_json::Value,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvokeResponse {
    pub tool_id: String,
    pub result: serde_json::Value,
}

#[utoipa::path(
    get,
    path = "/tools",
    tag = "tools",
    responses((status = 200, body = ToolListResponse))
)]
pub(crate) async fn list(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<ToolListResponse>, ApiError> {
    let controller = state.controller.lock().expect("controller lock");
    let registry = controller.registry();
    let tools: Vec<ToolView> = registry
        .tool_ids()
        .iter()
        .map(|id| registry.render(id))
        .collect();
    Ok(Json(ToolListResponse {
        count: tools.len(),
        tools,
    }))
}

#[utoipa::path(
    post,
    path = "/tools/invoke",
    tag = "tools",
    request_body = InvokeRequest,
    responses(
        (status = 200, body = InvokeResponse),
        (status = 400, body = crate::server::error::ApiErrorResponse),
        (status = 404, body = crate::server::error::ApiErrorResponse),
    )
)]
pub(crate) async fn invoke(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<InvokeRequest>,
) -> Result<Json<InvokeResponse>, ApiError> {
    let mut docs = state.docs.lock().await;

    // Handlers are synchronous; run under the controller lock so tools never
    // interleave, then persist only when something changed.
    let result = {
        let controller = state.controller.lock().expect("controller lock");
        let tool = controller
            .registry()
            .lookup(&payload.tool_id)
            .ok_or_else(|| ApiError::not_found(format!("unknown tool: {}", payload.tool_id)))?;
        validate_schema(&payload.args, &tool.input_schema)?;
        let mut ctx = ExecutionContext {
            docs: &mut docs,
            events: &state.bus,
        };
        (tool.handler)(&payload.args, &mut ctx)?
    };

    if docs.take_dirty() {
        docs.save_all(state.storage.as_ref()).await?;
    }

    Ok(Json(InvokeResponse {
        tool_id: payload.tool_id,
        result,
    }))
}
