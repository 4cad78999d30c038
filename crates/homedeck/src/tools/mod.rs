pub mod registry;
pub mod schema;

pub use registry::ToolRegistry;
pub use schema::{ExecutionContext, ToolDefinition, ToolView};
