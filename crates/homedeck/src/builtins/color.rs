//! Color tools: picker conversions, gradient builder, palette generator.

use rand::Rng;
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::error::{CoreError, CoreResult};
use crate::tools::schema::ToolDefinition;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ColorInfo {
    pub hex: String,
    pub rgb: String,
    pub hsl: String,
}

/// Parse a `#rrggbb` color.
pub fn hex_to_rgb(hex: &str) -> CoreResult<(u8, u8, u8)> {
    let digits = hex
        .strip_prefix('#')
        .ok_or_else(|| CoreError::InvalidInput(format!("color must start with '#': {hex}")))?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CoreError::InvalidInput(format!(
            "color must be #rrggbb: {hex}"
        )));
    }
    let r = u8::from_str_radix(&digits[0..2], 16).expect("validated hex");
    let g = u8::from_str_radix(&digits[2..4], 16).expect("validated hex");
    let b = u8::from_str_radix(&digits[4..6], 16).expect("validated hex");
    Ok((r, g, b))
}

pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// RGB → HSL, rounded to whole degrees / percents.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (u32, u32, u32) {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if (max - min).abs() < f64::EPSILON {
        return (0, 0, (l * 100.0).round() as u32);
    }

    let d = max - min;
    let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
    let h = if (max - r).abs() < f64::EPSILON {
        ((g - b) / d + if g < b { 6.0 } else { 0.0 }) / 6.0
    } else if (max - g).abs() < f64::EPSILON {
        ((b - r) / d + 2.0) / 6.0
    } else {
        ((r - g) / d + 4.0) / 6.0
    };

    (
        (h * 360.0).round() as u32,
        (s * 100.0).round() as u32,
        (l * 100.0).round() as u32,
    )
}

/// HSL → `#rrggbb`, hue in degrees, saturation/lightness in percent.
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    let l = l / 100.0;
    let a = s * l.min(1.0 - l) / 100.0;
    let f = |n: f64| {
        let k = (n + h / 30.0) % 12.0;
        let color = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
        (255.0 * color).round() as u8
    };
    rgb_to_hex(f(0.0), f(8.0), f(4.0))
}

/// All three notations for a hex color.
pub fn color_info(hex: &str) -> CoreResult<ColorInfo> {
    let (r, g, b) = hex_to_rgb(hex)?;
    let (h, s, l) = rgb_to_hsl(r, g, b);
    Ok(ColorInfo {
        hex: hex.to_lowercase(),
        rgb: format!("rgb({r}, {g}, {b})"),
        hsl: format!("hsl({h}, {s}%, {l}%)"),
    })
}

/// CSS linear-gradient declaration from two colors and an angle.
pub fn gradient_css(color1: &str, color2: &str, angle: u32) -> CoreResult<String> {
    hex_to_rgb(color1)?;
    hex_to_rgb(color2)?;
    if angle > 360 {
        return Err(CoreError::InvalidInput(format!(
            "angle out of range: {angle}"
        )));
    }
    Ok(format!(
        "background: linear-gradient({angle}deg, {color1}, {color2});"
    ))
}

pub fn random_gradient<R: Rng>(rng: &mut R) -> (String, String, u32) {
    let color = |rng: &mut R| rgb_to_hex(rng.gen(), rng.gen(), rng.gen());
    (color(rng), color(rng), rng.gen_range(0..360))
}

/// Five harmonious colors: a random base hue stepped by 30°, with bounded
/// saturation and lightness.
pub fn generate_palette<R: Rng>(rng: &mut R) -> Vec<String> {
    let base_hue = rng.gen_range(0..360) as f64;
    (0..5)
        .map(|i| {
            let hue = (base_hue + (i as f64) * 30.0) % 360.0;
            let sat = 60.0 + rng.gen_range(0.0..20.0);
            let light = 40.0 + rng.gen_range(0.0..40.0);
            hsl_to_hex(hue, sat, light)
        })
        .collect()
}

pub fn color_picker_tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: "color-picker".to_string(),
        title: "Color Picker".to_string(),
        icon: "🎨".to_string(),
        keywords: vec!["hex".into(), "rgb".into(), "hsl".into()],
        input_schema: json!({
            "type": "object",
            "required": ["hex"],
            "properties": {"hex": {"type": "string"}}
        }),
        output_schema: json!({
            "type": "object",
            "properties": {
                "hex": {"type": "string"},
                "rgb": {"type": "string"},
                "hsl": {"type": "string"}
            }
        }),
        handler: Box::new(|args, _ctx| {
            let hex = args.get("hex").and_then(|v| v.as_str()).unwrap_or("");
            let info = color_info(hex)?;
            serde_json::to_value(&info)
                .map_err(|e| CoreError::Internal(format!("color serialize error: {e}")))
        }),
    }
}

pub fn gradient_tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: "gradient-generator".to_string(),
        title: "Gradient Generator".to_string(),
        icon: "🌈".to_string(),
        keywords: vec!["css".into(), "background".into()],
        input_schema: json!({
            "type": "object",
            "properties": {
                "color1": {"type": "string"},
                "color2": {"type": "string"},
                "angle": {"type": "integer"}
            }
        }),
        output_schema: json!({
            "type": "object",
            "properties": {"css": {"type": "string"}}
        }),
        handler: Box::new(|args, _ctx| {
            // No args means the randomize button.
            let (color1, color2, angle) = match (
                args.get("color1").and_then(|v| v.as_str()),
                args.get("color2").and_then(|v| v.as_str()),
            ) {
                (Some(c1), Some(c2)) => {
                    let angle = args.get("angle").and_then(|v| v.as_u64()).unwrap_or(135) as u32;
                    (c1.to_string(), c2.to_string(), angle)
                }
                _ => random_gradient(&mut rand::thread_rng()),
            };
            let css = gradient_css(&color1, &color2, angle)?;
            Ok(json!({
                "css": css,
                "color1": color1,
                "color2": color2,
                "angle": angle
            }))
        }),
    }
}

pub fn palette_tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: "palette-generator".to_string(),
        title: "Palette Generator".to_string(),
        icon: "🎨".to_string(),
        keywords: vec!["colors".into(), "scheme".into()],
        input_schema: json!({"type": "object"}),
        output_schema: json!({
            "type": "object",
            "properties": {"colors": {"type": "array"}}
        }),
        handler: Box::new(|_args, _ctx| {
            let colors = generate_palette(&mut rand::thread_rng());
            Ok(json!({ "colors": colors }))
        }),
    }
}
