//! Game tools. The round state machines live in the submodules; the tool
//! handlers expose the stateless pieces (rolls, problems, sample texts,
//! boards) plus best-score persistence, and the shell drives the rounds.

pub mod dice;
pub mod eight_ball;
pub mod memory;
pub mod quick_maths;
pub mod reaction;
pub mod simon;
pub mod typing;

use rand::Rng;
use serde_json::json;

use crate::error::{CoreError, CoreResult};
use crate::tools::schema::{ExecutionContext, ToolDefinition};

/// Record a score and report the stored best.
fn record_best(
    ctx: &mut ExecutionContext,
    game: &str,
    score: i64,
    higher_is_better: bool,
) -> CoreResult<serde_json::Value> {
    let improved = ctx
        .docs
        .best_scores_mut()
        .record(game, score, higher_is_better);
    let best = ctx.docs.best_scores().scores[game];
    Ok(json!({ "improved": improved, "best": best }))
}

fn op_of(args: &serde_json::Value) -> &str {
    args.get("op").and_then(|v| v.as_str()).unwrap_or("")
}

pub fn dice_tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: "dice-roller".to_string(),
        title: "Dice Roller".to_string(),
        icon: "🎲".to_string(),
        keywords: vec!["d20".into(), "roll".into(), "random".into()],
        input_schema: json!({
            "type": "object",
            "properties": {
                "count": {"type": "integer"},
                "sides": {"type": "integer"}
            }
        }),
        output_schema: json!({
            "type": "object",
            "properties": {
                "rolls": {"type": "array"},
                "total": {"type": "integer"},
                "description": {"type": "string"}
            }
        }),
        handler: Box::new(|args, _ctx| {
            let count = args.get("count").and_then(|v| v.as_u64()).unwrap_or(1) as u32;
            let sides = args.get("sides").and_then(|v| v.as_u64()).unwrap_or(6) as u32;
            let roll = dice::roll(&mut rand::thread_rng(), count, sides)?;
            Ok(json!({
                "rolls": roll.rolls,
                "total": roll.total,
                "description": roll.describe()
            }))
        }),
    }
}

pub fn eight_ball_tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: "magic-8-ball".to_string(),
        title: "Magic 8 Ball".to_string(),
        icon: "🎱".to_string(),
        keywords: vec!["fortune".into(), "oracle".into()],
        input_schema: json!({"type": "object"}),
        output_schema: json!({
            "type": "object",
            "properties": {"answer": {"type": "string"}}
        }),
        handler: Box::new(|_args, _ctx| {
            Ok(json!({ "answer": eight_ball::shake(&mut rand::thread_rng()) }))
        }),
    }
}

pub fn quick_maths_tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: "quick-maths".to_string(),
        title: "Quick Maths".to_string(),
        icon: "🧮".to_string(),
        keywords: vec!["mental".into(), "arithmetic".into(), "game".into()],
        input_schema: json!({
            "type": "object",
            "required": ["op"],
            "properties": {
                "op": {"type": "string"},
                "score": {"type": "integer"}
            }
        }),
        output_schema: json!({"type": "object"}),
        handler: Box::new(|args, ctx| match op_of(args) {
            "problem" => {
                let problem = quick_maths::generate_problem(&mut rand::thread_rng());
                Ok(json!({
                    "display": problem.display(),
                    "answer": problem.answer
                }))
            }
            "recordBest" => {
                let score = args.get("score").and_then(|v| v.as_i64()).unwrap_or(0);
                record_best(ctx, quick_maths::GAME_ID, score, true)
            }
            other => Err(CoreError::InvalidInput(format!(
                "unknown quick-maths op: {other}"
            ))),
        }),
    }
}

pub fn typing_tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: "typing-test".to_string(),
        title: "Typing Speed Test".to_string(),
        icon: "⌨️".to_string(),
        keywords: vec!["wpm".into(), "speed".into(), "keyboard".into()],
        input_schema: json!({
            "type": "object",
            "required": ["op"],
            "properties": {
                "op": {"type": "string"},
                "target": {"type": "string"},
                "typed": {"type": "string"},
                "elapsedSecs": {"type": "number"},
                "wpm": {"type": "integer"}
            }
        }),
        output_schema: json!({"type": "object"}),
        handler: Box::new(|args, ctx| match op_of(args) {
            "text" => Ok(json!({ "text": typing::pick_text(&mut rand::thread_rng()) })),
            "stats" => {
                let target = args.get("target").and_then(|v| v.as_str()).unwrap_or("");
                let typed = args.get("typed").and_then(|v| v.as_str()).unwrap_or("");
                let elapsed = args
                    .get("elapsedSecs")
                    .and_then(|v| v.as_f64())
                    .unwrap_or(0.0);
                let stats = typing::stats(target, typed, elapsed);
                serde_json::to_value(&stats)
                    .map_err(|e| CoreError::Internal(format!("stats serialize error: {e}")))
            }
            "recordBest" => {
                let wpm = args.get("wpm").and_then(|v| v.as_i64()).unwrap_or(0);
                record_best(ctx, typing::GAME_ID, wpm, true)
            }
            other => Err(CoreError::InvalidInput(format!(
                "unknown typing-test op: {other}"
            ))),
        }),
    }
}

pub fn memory_tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: "memory-game".to_string(),
        title: "Memory".to_string(),
        icon: "🃏".to_string(),
        keywords: vec!["pairs".into(), "cards".into(), "game".into()],
        input_schema: json!({
            "type": "object",
            "required": ["op"],
            "properties": {
                "op": {"type": "string"},
                "pairs": {"type": "integer"},
                "moves": {"type": "integer"}
            }
        }),
        output_schema: json!({"type": "object"}),
        handler: Box::new(|args, ctx| match op_of(args) {
            "board" => {
                let pairs = args.get("pairs").and_then(|v| v.as_u64()).unwrap_or(6) as usize;
                let game = memory::MemoryGame::new(&mut rand::thread_rng(), pairs)?;
                let symbols: Vec<u8> = (0..game.size())
                    .map(|i| game.symbol_at(i).unwrap_or_default())
                    .collect();
                Ok(json!({ "symbols": symbols }))
            }
            "recordBest" => {
                let moves = args.get("moves").and_then(|v| v.as_i64()).unwrap_or(i64::MAX);
                record_best(ctx, memory::GAME_ID, moves, false)
            }
            other => Err(CoreError::InvalidInput(format!(
                "unknown memory op: {other}"
            ))),
        }),
    }
}

pub fn simon_tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: "simon-says".to_string(),
        title: "Simon Says".to_string(),
        icon: "🔴".to_string(),
        keywords: vec!["sequence".into(), "colors".into(), "game".into()],
        input_schema: json!({
            "type": "object",
            "required": ["op"],
            "properties": {
                "op": {"type": "string"},
                "score": {"type": "integer"}
            }
        }),
        output_schema: json!({"type": "object"}),
        handler: Box::new(|args, ctx| match op_of(args) {
            "next" => Ok(json!({
                "color": rand::thread_rng().gen_range(0..simon::COLOR_COUNT)
            })),
            "recordBest" => {
                let score = args.get("score").and_then(|v| v.as_i64()).unwrap_or(0);
                record_best(ctx, simon::GAME_ID, score, true)
            }
            other => Err(CoreError::InvalidInput(format!(
                "unknown simon op: {other}"
            ))),
        }),
    }
}

pub fn reaction_tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: "reaction-test".to_string(),
        title: "Reaction Test".to_string(),
        icon: "⚡".to_string(),
        keywords: vec!["reflex".into(), "speed".into()],
        input_schema: json!({
            "type": "object",
            "required": ["op"],
            "properties": {
                "op": {"type": "string"},
                "ms": {"type": "integer"}
            }
        }),
        output_schema: json!({"type": "object"}),
        handler: Box::new(|args, ctx| match op_of(args) {
            "arm" => {
                let delay = rand::thread_rng().gen_range(reaction::MIN_DELAY_MS..=reaction::MAX_DELAY_MS);
                Ok(json!({ "delayMs": delay }))
            }
            "recordBest" => {
                let ms = args.get("ms").and_then(|v| v.as_i64()).unwrap_or(i64::MAX);
                record_best(ctx, reaction::GAME_ID, ms, false)
            }
            other => Err(CoreError::InvalidInput(format!(
                "unknown reaction op: {other}"
            ))),
        }),
    }
}
