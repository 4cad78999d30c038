//! Tool registry.

use std::collections::BTreeMap;

use super::schema::{ToolDefinition, ToolView};

/// Registry of every tool the dashboard can mount. One flat namespace:
/// there is exactly one dashboard and tools never shadow each other.
pub struct ToolRegistry {
    tools: BTreeMap<String, ToolDefinition>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    /// Register a tool. Panics if a tool with the same ID already exists —
    /// duplicate registration is a programmer error, not a runtime state.
    pub fn register(&mut self, tool: ToolDefinition) {
        if self.tools.contains_key(&tool.tool_id) {
            panic!("duplicate tool: {}", tool.tool_id);
        }
        self.tools.insert(tool.tool_id.clone(), tool);
    }

    /// Look up a tool by ID.
    pub fn lookup(&self, tool_id: &str) -> Option<&ToolDefinition> {
        self.tools.get(tool_id)
    }

    /// Whether a tool ID is registered.
    pub fn contains(&self, tool_id: &str) -> bool {
        self.tools.contains_key(tool_id)
    }

    /// The renderable view for a key; unknown keys get a placeholder.
    pub fn render(&self, tool_id: &str) -> ToolView {
        match self.tools.get(tool_id) {
            Some(tool) => ToolView {
                tool_id: tool.tool_id.clone(),
                title: tool.title.clone(),
                icon: tool.icon.clone(),
                known: true,
            },
            None => ToolView::placeholder(tool_id),
        }
    }

    /// Sorted tool IDs.
    pub fn tool_ids(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    /// Iterate definitions in ID order.
    pub fn iter(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.values()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
