//! Cards for the upstream-backed tools. The handlers cover the synchronous
//! half (validation and request-URL building); the actual fetching, parsing,
//! and caching happens in the `integrations` services behind the server's
//! lookup routes.

use serde_json::json;

use crate::integrations::{dictionary, qr, translate};
use crate::tools::schema::ToolDefinition;

pub fn qr_tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: "qr-generator".to_string(),
        title: "QR Code Generator".to_string(),
        icon: "📱".to_string(),
        keywords: vec!["barcode".into(), "share".into()],
        input_schema: json!({
            "type": "object",
            "required": ["text"],
            "properties": {"text": {"type": "string"}}
        }),
        output_schema: json!({
            "type": "object",
            "properties": {
                "previewUrl": {"type": "string"},
                "downloadUrl": {"type": "string"}
            }
        }),
        handler: Box::new(|args, _ctx| {
            let text = args.get("text").and_then(|v| v.as_str()).unwrap_or("");
            let links = qr::qr_links(text)?;
            Ok(json!({
                "previewUrl": links.preview_url,
                "downloadUrl": links.download_url
            }))
        }),
    }
}

pub fn dictionary_tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: "dictionary".to_string(),
        title: "Dictionary".to_string(),
        icon: "📖".to_string(),
        keywords: vec!["word".into(), "definition".into(), "lookup".into()],
        input_schema: json!({
            "type": "object",
            "required": ["word"],
            "properties": {"word": {"type": "string"}}
        }),
        output_schema: json!({
            "type": "object",
            "properties": {"lookupUrl": {"type": "string"}}
        }),
        handler: Box::new(|args, _ctx| {
            let word = args.get("word").and_then(|v| v.as_str()).unwrap_or("");
            Ok(json!({ "lookupUrl": dictionary::lookup_url(word)? }))
        }),
    }
}

pub fn translator_tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: "translator".to_string(),
        title: "Translator".to_string(),
        icon: "🗣️".to_string(),
        keywords: vec!["language".into(), "translate".into()],
        input_schema: json!({
            "type": "object",
            "required": ["op"],
            "properties": {
                "op": {"type": "string"},
                "text": {"type": "string"},
                "pair": {"type": "string"}
            }
        }),
        output_schema: json!({"type": "object"}),
        handler: Box::new(|args, _ctx| {
            let op = args.get("op").and_then(|v| v.as_str()).unwrap_or("");
            match op {
                "pairs" => Ok(json!({ "pairs": translate::SUPPORTED_PAIRS })),
                "requestUrl" => {
                    let text = args.get("text").and_then(|v| v.as_str()).unwrap_or("");
                    let pair = args.get("pair").and_then(|v| v.as_str()).unwrap_or("");
                    Ok(json!({ "requestUrl": translate::request_url(text, pair)? }))
                }
                other => Err(crate::error::CoreError::InvalidInput(format!(
                    "unknown translator op: {other}"
                ))),
            }
        }),
    }
}
