//! Endpoints that start long-running timing tasks.
//!
//! Each spawned task's teardown is adopted by the controller, so closing the
//! dashboard or switching tools stops it. Starting a task for a tool that is
//! not the active one opens that tool first — a direct transition that
//! releases whatever the previous tool was running.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::builtins::timing::{self, metronome, pomodoro, timer};
use crate::server::error::ApiError;
use crate::server::ServerState;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CountdownRequest {
    #[serde(default)]
    pub hours: u32,
    #[serde(default)]
    pub minutes: u32,
    #[serde(default)]
    pub seconds: u32,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AlarmRequest {
    /// `HH:MM`, today or tomorrow, whichever comes first.
    pub time: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetronomeRequest {
    #[serde(default)]
    pub bpm: Option<u32>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroRequest {
    #[serde(default)]
    pub work_minutes: Option<u32>,
    #[serde(default)]
    pub break_minutes: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartedResponse {
    pub tool_id: String,
    pub started: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_secs: Option<u32>,
}

fn adopt(state: &ServerState, tool_id: &str, teardown: crate::dashboard::Teardown) {
    let mut controller = state.controller.lock().expect("controller lock");
    let active = controller
        .state()
        .active
        .as_ref()
        .map(|a| a.tool_id.clone());
    if active.as_deref() != Some(tool_id) {
        controller.open(tool_id);
    }
    controller
        .adopt(teardown)
        .expect("tool was just opened");
}

#[utoipa::path(
    post,
    path = "/tools/timer/countdown",
    tag = "timing",
    request_body = CountdownRequest,
    responses((status = 200, body = StartedResponse))
)]
pub(crate) async fn start_countdown(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<CountdownRequest>,
) -> Result<Json<StartedResponse>, ApiError> {
    // Reuse the state machine's validation before spawning anything.
    let mut machine = timer::TimerTool::new();
    machine.start_countdown(payload.hours, payload.minutes, payload.seconds)?;
    let total = machine.seconds();

    let teardown = timing::run_countdown(total, state.bus.clone());
    adopt(&state, "timer", teardown);
    Ok(Json(StartedResponse {
        tool_id: "timer".to_string(),
        started: true,
        delay_secs: Some(total),
    }))
}

#[utoipa::path(
    post,
    path = "/tools/timer/alarm",
    tag = "timing",
    request_body = AlarmRequest,
    responses((status = 200, body = StartedResponse))
)]
pub(crate) async fn set_alarm(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<AlarmRequest>,
) -> Result<Json<StartedResponse>, ApiError> {
    let target = timer::parse_alarm_time(&payload.time)?;
    let delay = timer::alarm_delay_secs(chrono::Local::now().time(), target);

    let teardown = timing::run_alarm(delay, state.bus.clone());
    adopt(&state, "timer", teardown);
    Ok(Json(StartedResponse {
        tool_id: "timer".to_string(),
        started: true,
        delay_secs: Some(delay),
    }))
}

#[utoipa::path(
    post,
    path = "/tools/metronome/start",
    tag = "timing",
    request_body = MetronomeRequest,
    responses((status = 200, body = StartedResponse))
)]
pub(crate) async fn start_metronome(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<MetronomeRequest>,
) -> Result<Json<StartedResponse>, ApiError> {
    let bpm = metronome::clamp_bpm(payload.bpm.unwrap_or(metronome::DEFAULT_BPM));
    let teardown = metronome::start(bpm, state.bus.clone());
    adopt(&state, "metronome", teardown);
    Ok(Json(StartedResponse {
        tool_id: "metronome".to_string(),
        started: true,
        delay_secs: None,
    }))
}

#[utoipa::path(
    post,
    path = "/tools/pomodoro/start",
    tag = "timing",
    request_body = PomodoroRequest,
    responses((status = 200, body = StartedResponse))
)]
pub(crate) async fn start_pomodoro(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<PomodoroRequest>,
) -> Result<Json<StartedResponse>, ApiError> {
    let cycle = pomodoro::Pomodoro::new(
        payload.work_minutes.unwrap_or(pomodoro::DEFAULT_WORK_MINUTES),
        payload.break_minutes.unwrap_or(pomodoro::DEFAULT_BREAK_MINUTES),
    )?;
    let teardown = timing::run_pomodoro(cycle, state.bus.clone());
    adopt(&state, "pomodoro", teardown);
    Ok(Json(StartedResponse {
        tool_id: "pomodoro".to_string(),
        started: true,
        delay_secs: None,
    }))
}
