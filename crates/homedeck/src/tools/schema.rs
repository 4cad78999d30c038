//! Tool definitions and JSON Schema validation.

use serde::Serialize;
use utoipa::ToSchema;

use crate::bus::Bus;
use crate::error::CoreResult;
use crate::storage::docs::DocumentSet;

/// Handler type: takes JSON args + mutable execution context, returns a JSON
/// result. Handlers are synchronous; anything slow or upstream-facing lives
/// outside the registry (see the `integrations` module).
pub type ToolHandler =
    Box<dyn Fn(&serde_json::Value, &mut ExecutionContext) -> CoreResult<serde_json::Value> + Send + Sync>;

/// Mutable context passed to tool handlers.
pub struct ExecutionContext<'a> {
    pub docs: &'a mut DocumentSet,
    pub events: &'a Bus,
}

/// Complete tool definition: identity, palette metadata, schemas, handler.
pub struct ToolDefinition {
    /// Unique identifier, e.g. `"metronome"` or `"todo.add"`.
    pub tool_id: String,
    /// Display name shown on the tool card and in the palette.
    pub title: String,
    /// Emoji icon.
    pub icon: String,
    /// Extra palette search keywords beyond the title.
    pub keywords: Vec<String>,
    /// JSON Schema for validating input arguments.
    pub input_schema: serde_json::Value,
    /// JSON Schema describing the output (documentation only).
    pub output_schema: serde_json::Value,
    /// The handler function to execute.
    pub handler: ToolHandler,
}

/// The renderable face of a tool. Unknown keys render as a placeholder
/// instead of failing, so a stale shell never breaks the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToolView {
    pub tool_id: String,
    pub title: String,
    pub icon: String,
    pub known: bool,
}

impl ToolView {
    pub fn placeholder(tool_id: &str) -> Self {
        Self {
            tool_id: tool_id.to_string(),
            title: "Coming soon".to_string(),
            icon: "🔧".to_string(),
            known: false,
        }
    }
}

/// Validate a JSON value against a minimal JSON Schema subset.
///
/// Supports: `type`, `required`, `properties` (recursive).
/// An empty schema `{}` passes anything.
pub fn validate_schema(value: &serde_json::Value, schema: &serde_json::Value) -> CoreResult<()> {
    let schema_obj = match schema.as_object() {
        Some(obj) => obj,
        None => return Ok(()),
    };

    if schema_obj.is_empty() {
        return Ok(());
    }

    if let Some(type_val) = schema_obj.get("type") {
        let type_str = type_val.as_str().ok_or_else(|| {
            crate::error::CoreError::InvalidInput("schema 'type' must be a string".to_string())
        })?;

        let matches = match type_str {
            "string" => value.is_string(),
            "number" => value.is_number(),
            "integer" => value.is_i64() || value.is_u64(),
            "boolean" => value.is_boolean(),
            "object" => value.is_object(),
            "array" => value.is_array(),
            "null" => value.is_null(),
            other => {
                return Err(crate::error::CoreError::InvalidInput(format!(
                    "unknown schema type: {other}"
                )));
            }
        };

        if !matches {
            return Err(crate::error::CoreError::InvalidInput(format!(
                "expected type '{type_str}', got {}",
                json_type_name(value)
            )));
        }
    }

    if let Some(required) = schema_obj.get("required") {
        if let Some(required_arr) = required.as_array() {
            if let Some(obj) = value.as_object() {
                for req in required_arr {
                    if let Some(key) = req.as_str() {
                        if !obj.contains_key(key) {
                            return Err(crate::error::CoreError::InvalidInput(format!(
                                "missing required field: '{key}'"
                            )));
                        }
                    }
                }
            }
        }
    }

    if let Some(properties) = schema_obj.get("properties") {
        if let (Some(props_obj), Some(val_obj)) = (properties.as_object(), value.as_object()) {
            for (key, prop_schema) in props_obj {
                if let Some(prop_value) = val_obj.get(key) {
                    validate_schema(prop_value, prop_schema)?;
                }
            }
        }
    }

    Ok(())
}

/// Returns a human-readable name for the JSON type of a value.
fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "integer"
            } else {
                "number"
            }
        }
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validate_string_pass() {
        let schema = json!({"type": "string"});
        assert!(validate_schema(&json!("hello"), &schema).is_ok());
    }

    #[test]
    fn validate_string_fail() {
        let schema = json!({"type": "string"});
        assert!(validate_schema(&json!(42), &schema).is_err());
    }

    #[test]
    fn validate_integer_fail_float() {
        let schema = json!({"type": "integer"});
        assert!(validate_schema(&json!(3.14), &schema).is_err());
    }

    #[test]
    fn validate_required_fail() {
        let schema = json!({
            "type": "object",
            "required": ["text"]
        });
        assert!(validate_schema(&json!({}), &schema).is_err());
    }

    #[test]
    fn validate_properties_recursive() {
        let schema = json!({
            "type": "object",
            "properties": {
                "count": {"type": "integer"},
                "label": {"type": "string"}
            }
        });
        assert!(validate_schema(&json!({"count": 5, "label": "ok"}), &schema).is_ok());
        assert!(validate_schema(&json!({"count": "five"}), &schema).is_err());
    }

    #[test]
    fn empty_schema_passes_anything() {
        let schema = json!({});
        assert!(validate_schema(&json!("string"), &schema).is_ok());
        assert!(validate_schema(&json!(null), &schema).is_ok());
        assert!(validate_schema(&json!([1, 2]), &schema).is_ok());
    }

    #[test]
    fn placeholder_view_is_unknown() {
        let view = ToolView::placeholder("mystery");
        assert_eq!(view.tool_id, "mystery");
        assert!(!view.known);
    }
}
