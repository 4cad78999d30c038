//! Sticky notes in randomly assigned pastel colors.

use rand::Rng;
use serde_json::json;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::storage::docs::{StickyNote, StickyNotes};
use crate::tools::schema::ToolDefinition;

pub const TOOL_ID: &str = "sticky-notes";

pub const PASTEL_COLORS: [&str; 5] = ["#FFD1DC", "#E0BBE4", "#D4F1F4", "#FFFACD", "#C1E1C1"];

/// New notes start empty; text arrives with the first blur-save.
pub fn add<R: Rng>(notes: &mut StickyNotes, rng: &mut R) -> StickyNote {
    let note = StickyNote {
        id: Uuid::new_v4().to_string(),
        text: String::new(),
        color: PASTEL_COLORS[rng.gen_range(0..PASTEL_COLORS.len())].to_string(),
    };
    notes.notes.push(note.clone());
    note
}

pub fn update(notes: &mut StickyNotes, id: &str, text: &str) -> CoreResult<StickyNote> {
    let note = notes
        .notes
        .iter_mut()
        .find(|note| note.id == id)
        .ok_or_else(|| CoreError::NotFound(format!("note {id}")))?;
    note.text = text.to_string();
    Ok(note.clone())
}

pub fn remove(notes: &mut StickyNotes, id: &str) -> CoreResult<()> {
    let before = notes.notes.len();
    notes.notes.retain(|note| note.id != id);
    if notes.notes.len() == before {
        return Err(CoreError::NotFound(format!("note {id}")));
    }
    Ok(())
}

pub fn tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: TOOL_ID.to_string(),
        title: "Sticky Notes".to_string(),
        icon: "📝".to_string(),
        keywords: vec!["memo".into(), "postit".into()],
        input_schema: json!({
            "type": "object",
            "required": ["op"],
            "properties": {
                "op": {"type": "string"},
                "id": {"type": "string"},
                "text": {"type": "string"}
            }
        }),
        output_schema: json!({"type": "object"}),
        handler: Box::new(|args, ctx| {
            let op = args.get("op").and_then(|v| v.as_str()).unwrap_or("");
            match op {
                "list" => {
                    let notes = &ctx.docs.sticky_notes().notes;
                    Ok(json!({ "notes": notes }))
                }
                "add" => {
                    let note = add(ctx.docs.sticky_notes_mut(), &mut rand::thread_rng());
                    Ok(json!({ "note": note }))
                }
                "update" => {
                    let id = args.get("id").and_then(|v| v.as_str()).unwrap_or("");
                    let text = args.get("text").and_then(|v| v.as_str()).unwrap_or("");
                    let note = update(ctx.docs.sticky_notes_mut(), id, text)?;
                    Ok(json!({ "note": note }))
                }
                "delete" => {
                    let id = args.get("id").and_then(|v| v.as_str()).unwrap_or("");
                    remove(ctx.docs.sticky_notes_mut(), id)?;
                    Ok(json!({ "deleted": true }))
                }
                other => Err(CoreError::InvalidInput(format!("unknown note op: {other}"))),
            }
        }),
    }
}
