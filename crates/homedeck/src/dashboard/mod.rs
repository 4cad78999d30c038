pub mod controller;
pub mod invariants;
pub mod state;
pub mod teardown;

pub use controller::Controller;
pub use state::{ActiveTool, DashboardState, ToolId};
pub use teardown::Teardown;
