use serde::Serialize;
use utoipa::ToSchema;

/// Events published on the [`crate::bus::Bus`] while the engine runs.
///
/// The stream is advisory: a shell that misses events can always re-read
/// state over HTTP.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum CoreEvent {
    ToolOpened(ToolLifecyclePayload),
    ToolClosed(ToolLifecyclePayload),
    Notification(NotificationPayload),
    MetronomeBeat(MetronomeBeatPayload),
    TimerFinished,
    PomodoroPhase(PomodoroPhasePayload),
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToolLifecyclePayload {
    pub tool_id: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetronomeBeatPayload {
    pub bpm: u32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroPhasePayload {
    pub phase: String,
    pub session: u32,
}

impl CoreEvent {
    pub fn notification(title: impl Into<String>, body: impl Into<String>) -> Self {
        CoreEvent::Notification(NotificationPayload {
            title: title.into(),
            body: body.into(),
        })
    }
}
