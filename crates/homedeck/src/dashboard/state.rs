use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Unique identifier for a tool.
pub type ToolId = String;

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// The tool currently mounted in the dashboard, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActiveTool {
    pub tool_id: ToolId,
    pub opened_at: Timestamp,
}

/// Serializable dashboard state. At most one tool is mounted at a time;
/// resource handles live in the controller, not here.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub session_id: String,
    pub active: Option<ActiveTool>,
    pub opened_count: u64,
    pub created_at: Timestamp,
    pub last_modified: Timestamp,
}

impl DashboardState {
    pub fn new() -> Self {
        let now = Self::now();
        Self {
            session_id: Uuid::new_v4().to_string(),
            active: None,
            opened_count: 0,
            created_at: now,
            last_modified: now,
        }
    }

    pub fn mount(&mut self, tool_id: &str) {
        let now = Self::now();
        self.active = Some(ActiveTool {
            tool_id: tool_id.to_string(),
            opened_at: now,
        });
        self.opened_count += 1;
        self.last_modified = now;
    }

    pub fn unmount(&mut self) {
        self.active = None;
        self.last_modified = Self::now();
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// Current unix timestamp in seconds.
    pub fn now() -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}
