//! Text tools: word counter, Base64, lorem ipsum, ASCII art, markdown
//! preview.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::error::{CoreError, CoreResult};
use crate::tools::schema::ToolDefinition;

const WORDS_PER_MINUTE: usize = 200;

const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. \
Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad \
minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea \
commodo consequat. Duis aute irure dolor in reprehenderit in voluptate velit \
esse cillum dolore eu fugiat nulla pariatur. Excepteur sint occaecat cupidatat \
non proident, sunt in culpa qui officia deserunt mollit anim id est laborum.";

// --- Word counter ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TextStats {
    pub words: usize,
    pub chars: usize,
    pub sentences: usize,
    pub paragraphs: usize,
    pub reading_minutes: usize,
}

pub fn text_stats(text: &str) -> TextStats {
    let words = text.split_whitespace().count();
    let sentences = text
        .split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count();
    let paragraphs = text
        .split("\n\n")
        .filter(|p| !p.trim().is_empty())
        .count();
    let reading_minutes = words.div_ceil(WORDS_PER_MINUTE);
    TextStats {
        words,
        chars: text.chars().count(),
        sentences,
        paragraphs,
        reading_minutes,
    }
}

// --- Base64 ---

pub fn base64_encode(input: &str) -> String {
    BASE64.encode(input.as_bytes())
}

pub fn base64_decode(input: &str) -> CoreResult<String> {
    let bytes = BASE64
        .decode(input.trim())
        .map_err(|e| CoreError::InvalidInput(format!("invalid Base64 string: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|_| CoreError::InvalidInput("decoded bytes are not UTF-8".to_string()))
}

// --- Lorem ipsum ---

pub fn lorem(kind: &str, count: usize) -> CoreResult<String> {
    if count == 0 {
        return Err(CoreError::InvalidInput("count must be positive".to_string()));
    }
    let out = match kind {
        "words" => {
            let words: Vec<&str> = LOREM
                .split_whitespace()
                .map(|w| w.trim_matches(|c| c == '.' || c == ','))
                .collect();
            (0..count)
                .map(|i| words[i % words.len()])
                .collect::<Vec<_>>()
                .join(" ")
        }
        "sentences" => {
            let sentences: Vec<&str> = LOREM
                .split(". ")
                .map(|s| s.trim_end_matches('.'))
                .collect();
            (0..count)
                .map(|i| format!("{}.", sentences[i % sentences.len()]))
                .collect::<Vec<_>>()
                .join(" ")
        }
        "paragraphs" => vec![LOREM; count].join("\n\n"),
        other => {
            return Err(CoreError::InvalidInput(format!(
                "unknown lorem kind: {other}"
            )))
        }
    };
    Ok(out)
}

// --- ASCII art ---

pub fn ascii_art(text: &str, style: &str) -> CoreResult<String> {
    if text.is_empty() {
        return Err(CoreError::InvalidInput("empty text".to_string()));
    }
    match style {
        "big" => Ok(text
            .to_uppercase()
            .chars()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ")),
        "binary" => Ok(text
            .chars()
            .map(|c| format!("{:b}", c as u32))
            .collect::<Vec<_>>()
            .join(" ")),
        "box" => {
            let width = text.chars().count() + 4;
            let line = "─".repeat(width);
            Ok(format!("┌{line}┐\n│  {text}  │\n└{line}┘"))
        }
        other => Err(CoreError::InvalidInput(format!(
            "unknown ascii style: {other}"
        ))),
    }
}

// --- Markdown preview ---

/// Line-oriented markdown subset: headings, bold, italic, links, fenced and
/// inline code, dash lists, paragraph breaks. Not a full CommonMark parser —
/// it renders the same subset the preview pane always has.
pub fn markdown_to_html(input: &str) -> String {
    let mut html = String::new();
    let mut in_code_block = false;
    let mut previous_blank = false;

    for line in input.lines() {
        if line.trim_start().starts_with("```") {
            html.push_str(if in_code_block { "</code></pre>\n" } else { "<pre><code>" });
            in_code_block = !in_code_block;
            previous_blank = false;
            continue;
        }
        if in_code_block {
            html.push_str(line);
            html.push('\n');
            continue;
        }
        if line.trim().is_empty() {
            if !previous_blank && !html.is_empty() {
                html.push_str("<br><br>\n");
            }
            previous_blank = true;
            continue;
        }
        previous_blank = false;

        let rendered = if let Some(rest) = line.strip_prefix("### ") {
            format!("<h3>{}</h3>", inline_markdown(rest))
        } else if let Some(rest) = line.strip_prefix("## ") {
            format!("<h2>{}</h2>", inline_markdown(rest))
        } else if let Some(rest) = line.strip_prefix("# ") {
            format!("<h1>{}</h1>", inline_markdown(rest))
        } else if let Some(rest) = line.trim_start().strip_prefix("- ") {
            format!("<li>{}</li>", inline_markdown(rest))
        } else {
            inline_markdown(line)
        };
        html.push_str(&rendered);
        html.push('\n');
    }

    if in_code_block {
        html.push_str("</code></pre>\n");
    }
    html.trim_end().to_string()
}

fn inline_markdown(line: &str) -> String {
    let mut out = replace_pairs(line, "**", "<strong>", "</strong>");
    out = replace_pairs(&out, "*", "<em>", "</em>");
    out = replace_pairs(&out, "`", "<code>", "</code>");
    replace_links(&out)
}

fn replace_pairs(input: &str, marker: &str, open: &str, close: &str) -> String {
    let mut out = String::new();
    let mut rest = input;
    loop {
        let Some(start) = rest.find(marker) else {
            out.push_str(rest);
            return out;
        };
        let after = &rest[start + marker.len()..];
        let Some(end) = after.find(marker) else {
            out.push_str(rest);
            return out;
        };
        out.push_str(&rest[..start]);
        out.push_str(open);
        out.push_str(&after[..end]);
        out.push_str(close);
        rest = &after[end + marker.len()..];
    }
}

fn replace_links(input: &str) -> String {
    let mut out = String::new();
    let mut rest = input;
    loop {
        let Some(open_bracket) = rest.find('[') else {
            out.push_str(rest);
            return out;
        };
        let candidate = &rest[open_bracket..];
        let parsed = candidate.find("](").and_then(|mid| {
            candidate[mid..].find(')').map(|close| {
                let text = &candidate[1..mid];
                let url = &candidate[mid + 2..mid + close];
                (text, url, open_bracket + mid + close + 1)
            })
        });
        match parsed {
            Some((text, url, consumed)) => {
                out.push_str(&rest[..open_bracket]);
                out.push_str(&format!("<a href=\"{url}\" target=\"_blank\">{text}</a>"));
                rest = &rest[consumed..];
            }
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
}

// --- Tool definitions ---

pub fn word_counter_tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: "word-counter".to_string(),
        title: "Word Counter".to_string(),
        icon: "📝".to_string(),
        keywords: vec!["text".into(), "count".into(), "statistics".into()],
        input_schema: json!({
            "type": "object",
            "required": ["text"],
            "properties": {"text": {"type": "string"}}
        }),
        output_schema: json!({
            "type": "object",
            "properties": {
                "words": {"type": "integer"},
                "chars": {"type": "integer"},
                "sentences": {"type": "integer"},
                "paragraphs": {"type": "integer"},
                "readingMinutes": {"type": "integer"}
            }
        }),
        handler: Box::new(|args, _ctx| {
            let text = args.get("text").and_then(|v| v.as_str()).unwrap_or("");
            let stats = text_stats(text);
            serde_json::to_value(&stats)
                .map_err(|e| CoreError::Internal(format!("stats serialize error: {e}")))
        }),
    }
}

pub fn base64_tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: "base64".to_string(),
        title: "Base64 Converter".to_string(),
        icon: "🔢".to_string(),
        keywords: vec!["encode".into(), "decode".into()],
        input_schema: json!({
            "type": "object",
            "required": ["op", "text"],
            "properties": {
                "op": {"type": "string"},
                "text": {"type": "string"}
            }
        }),
        output_schema: json!({
            "type": "object",
            "properties": {"output": {"type": "string"}}
        }),
        handler: Box::new(|args, _ctx| {
            let op = args.get("op").and_then(|v| v.as_str()).unwrap_or("");
            let text = args.get("text").and_then(|v| v.as_str()).unwrap_or("");
            let output = match op {
                "encode" => base64_encode(text),
                "decode" => base64_decode(text)?,
                other => {
                    return Err(CoreError::InvalidInput(format!(
                        "unknown base64 op: {other}"
                    )))
                }
            };
            Ok(json!({ "output": output }))
        }),
    }
}

pub fn lorem_tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: "lorem-ipsum".to_string(),
        title: "Lorem Ipsum".to_string(),
        icon: "📄".to_string(),
        keywords: vec!["filler".into(), "placeholder".into()],
        input_schema: json!({
            "type": "object",
            "required": ["kind", "count"],
            "properties": {
                "kind": {"type": "string"},
                "count": {"type": "integer"}
            }
        }),
        output_schema: json!({
            "type": "object",
            "properties": {"text": {"type": "string"}}
        }),
        handler: Box::new(|args, _ctx| {
            let kind = args.get("kind").and_then(|v| v.as_str()).unwrap_or("");
            let count = args.get("count").and_then(|v| v.as_u64()).unwrap_or(0) as usize;
            Ok(json!({ "text": lorem(kind, count)? }))
        }),
    }
}

pub fn ascii_art_tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: "ascii-art".to_string(),
        title: "ASCII Art".to_string(),
        icon: "💻".to_string(),
        keywords: vec!["figlet".into(), "banner".into()],
        input_schema: json!({
            "type": "object",
            "required": ["text", "style"],
            "properties": {
                "text": {"type": "string"},
                "style": {"type": "string"}
            }
        }),
        output_schema: json!({
            "type": "object",
            "properties": {"art": {"type": "string"}}
        }),
        handler: Box::new(|args, _ctx| {
            let text = args.get("text").and_then(|v| v.as_str()).unwrap_or("");
            let style = args.get("style").and_then(|v| v.as_str()).unwrap_or("big");
            Ok(json!({ "art": ascii_art(text, style)? }))
        }),
    }
}

pub fn markdown_tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: "markdown-preview".to_string(),
        title: "Markdown Preview".to_string(),
        icon: "📝".to_string(),
        keywords: vec!["markdown".into(), "render".into(), "html".into()],
        input_schema: json!({
            "type": "object",
            "required": ["text"],
            "properties": {"text": {"type": "string"}}
        }),
        output_schema: json!({
            "type": "object",
            "properties": {"html": {"type": "string"}}
        }),
        handler: Box::new(|args, _ctx| {
            let text = args.get("text").and_then(|v| v.as_str()).unwrap_or("");
            Ok(json!({ "html": markdown_to_html(text) }))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_count_everything() {
        let text = "Hello world. How are you?\n\nSecond paragraph!";
        let stats = text_stats(text);
        assert_eq!(stats.words, 7);
        assert_eq!(stats.sentences, 3);
        assert_eq!(stats.paragraphs, 2);
        assert_eq!(stats.reading_minutes, 1);
    }

    #[test]
    fn stats_empty_text() {
        let stats = text_stats("");
        assert_eq!(stats.words, 0);
        assert_eq!(stats.sentences, 0);
        assert_eq!(stats.paragraphs, 0);
        assert_eq!(stats.reading_minutes, 0);
    }

    #[test]
    fn stats_reading_time_rounds_up() {
        let text = vec!["word"; 201].join(" ");
        assert_eq!(text_stats(&text).reading_minutes, 2);
    }

    #[test]
    fn base64_round_trip() {
        let encoded = base64_encode("hello, toolbox");
        assert_eq!(encoded, "aGVsbG8sIHRvb2xib3g=");
        assert_eq!(base64_decode(&encoded).unwrap(), "hello, toolbox");
    }

    #[test]
    fn base64_decode_rejects_garbage() {
        assert!(base64_decode("not base64!!!").is_err());
    }

    #[test]
    fn lorem_words_cycle() {
        let out = lorem("words", 3).unwrap();
        assert_eq!(out, "Lorem ipsum dolor");
        let long = lorem("words", 100).unwrap();
        assert_eq!(long.split_whitespace().count(), 100);
    }

    #[test]
    fn lorem_sentences_end_with_period() {
        let out = lorem("sentences", 2).unwrap();
        assert!(out.ends_with('.'));
        assert!(out.starts_with("Lorem ipsum"));
    }

    #[test]
    fn lorem_paragraphs_separated_by_blank_line() {
        let out = lorem("paragraphs", 2).unwrap();
        assert_eq!(out.matches("\n\n").count(), 1);
    }

    #[test]
    fn lorem_rejects_zero_and_unknown_kind() {
        assert!(lorem("words", 0).is_err());
        assert!(lorem("pages", 1).is_err());
    }

    #[test]
    fn ascii_big_spaces_uppercase() {
        assert_eq!(ascii_art("hi", "big").unwrap(), "H I");
    }

    #[test]
    fn ascii_binary_codes() {
        assert_eq!(ascii_art("AB", "binary").unwrap(), "1000001 1000010");
    }

    #[test]
    fn ascii_box_wraps_text() {
        let art = ascii_art("hi", "box").unwrap();
        let lines: Vec<&str> = art.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "│  hi  │");
        assert!(lines[0].starts_with('┌') && lines[0].ends_with('┐'));
    }

    #[test]
    fn markdown_headings_and_inline() {
        let html = markdown_to_html("# Title\n\nSome **bold** and *em* and `code`.");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>em</em>"));
        assert!(html.contains("<code>code</code>"));
    }

    #[test]
    fn markdown_links_and_lists() {
        let html = markdown_to_html("- [site](https://example.com)");
        assert!(html.contains("<li>"));
        assert!(html.contains("<a href=\"https://example.com\" target=\"_blank\">site</a>"));
    }

    #[test]
    fn markdown_fenced_code_block() {
        let html = markdown_to_html("```\nlet x = 1;\n```");
        assert!(html.starts_with("<pre><code>"));
        assert!(html.contains("let x = 1;"));
        assert!(html.contains("</code></pre>"));
    }

    #[test]
    fn markdown_unclosed_markers_left_alone() {
        let html = markdown_to_html("a * lonely star");
        assert!(html.contains("a * lonely star"));
    }
}
