//! Todo list CRUD.

use serde_json::json;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::storage::docs::{TodoItem, TodoList};
use crate::tools::schema::ToolDefinition;

pub const TOOL_ID: &str = "todo-list";

pub fn add(todos: &mut TodoList, text: &str) -> CoreResult<TodoItem> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CoreError::InvalidInput("todo text is empty".to_string()));
    }
    let item = TodoItem {
        id: Uuid::new_v4().to_string(),
        text: text.to_string(),
        completed: false,
    };
    todos.items.push(item.clone());
    Ok(item)
}

pub fn toggle(todos: &mut TodoList, id: &str) -> CoreResult<TodoItem> {
    let item = todos
        .items
        .iter_mut()
        .find(|item| item.id == id)
        .ok_or_else(|| CoreError::NotFound(format!("todo {id}")))?;
    item.completed = !item.completed;
    Ok(item.clone())
}

pub fn remove(todos: &mut TodoList, id: &str) -> CoreResult<()> {
    let before = todos.items.len();
    todos.items.retain(|item| item.id != id);
    if todos.items.len() == before {
        return Err(CoreError::NotFound(format!("todo {id}")));
    }
    Ok(())
}

pub fn tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: TOOL_ID.to_string(),
        title: "Todo List".to_string(),
        icon: "✅".to_string(),
        keywords: vec!["tasks".into(), "checklist".into()],
        input_schema: json!({
            "type": "object",
            "required": ["op"],
            "properties": {
                "op": {"type": "string"},
                "text": {"type": "string"},
                "id": {"type": "string"}
            }
        }),
        output_schema: json!({"type": "object"}),
        handler: Box::new(|args, ctx| {
            let op = args.get("op").and_then(|v| v.as_str()).unwrap_or("");
            match op {
                "list" => {
                    let items = &ctx.docs.todos().items;
                    Ok(json!({ "items": items, "count": items.len() }))
                }
                "add" => {
                    let text = args.get("text").and_then(|v| v.as_str()).unwrap_or("");
                    let item = add(ctx.docs.todos_mut(), text)?;
                    Ok(json!({ "item": item }))
                }
                "toggle" => {
                    let id = args.get("id").and_then(|v| v.as_str()).unwrap_or("");
                    let item = toggle(ctx.docs.todos_mut(), id)?;
                    Ok(json!({ "item": item }))
                }
                "delete" => {
                    let id = args.get("id").and_then(|v| v.as_str()).unwrap_or("");
                    remove(ctx.docs.todos_mut(), id)?;
                    Ok(json!({ "deleted": true }))
                }
                other => Err(CoreError::InvalidInput(format!("unknown todo op: {other}"))),
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_appends_uncompleted_item() {
        let mut todos = TodoList::default();
        let item = add(&mut todos, "  water plants  ").unwrap();
        assert_eq!(item.text, "water plants");
        assert!(!item.completed);
        assert_eq!(todos.items.len(), 1);
    }

    #[test]
    fn empty_text_rejected() {
        let mut todos = TodoList::default();
        assert!(add(&mut todos, "   ").is_err());
        assert!(todos.items.is_empty());
    }

    #[test]
    fn toggle_flips_completion() {
        let mut todos = TodoList::default();
        let item = add(&mut todos, "read").unwrap();
        assert!(toggle(&mut todos, &item.id).unwrap().completed);
        assert!(!toggle(&mut todos, &item.id).unwrap().completed);
    }

    #[test]
    fn remove_deletes_by_id() {
        let mut todos = TodoList::default();
        let keep = add(&mut todos, "keep").unwrap();
        let drop = add(&mut todos, "drop").unwrap();
        remove(&mut todos, &drop.id).unwrap();
        assert_eq!(todos.items.len(), 1);
        assert_eq!(todos.items[0].id, keep.id);
    }

    #[test]
    fn missing_id_is_not_found() {
        let mut todos = TodoList::default();
        assert!(matches!(toggle(&mut todos, "nope"), Err(CoreError::NotFound(_))));
        assert!(matches!(remove(&mut todos, "nope"), Err(CoreError::NotFound(_))));
    }
}
