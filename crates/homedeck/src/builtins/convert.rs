//! Unit converter: length, weight, volume by factor table; temperature by
//! formula.

use serde_json::json;

use crate::error::{CoreError, CoreResult};
use crate::tools::schema::ToolDefinition;

pub const TOOL_ID: &str = "unit-converter";

/// Factors express "units per base unit" (metre, kilogram, litre), so
/// converting goes value / from_factor * to_factor.
const LENGTH: [(&str, f64); 8] = [
    ("m", 1.0),
    ("km", 0.001),
    ("cm", 100.0),
    ("mm", 1000.0),
    ("mi", 0.000_621_371),
    ("yd", 1.093_61),
    ("ft", 3.280_84),
    ("in", 39.370_1),
];

const WEIGHT: [(&str, f64); 5] = [
    ("kg", 1.0),
    ("g", 1000.0),
    ("mg", 1_000_000.0),
    ("lb", 2.204_62),
    ("oz", 35.274),
];

const VOLUME: [(&str, f64); 6] = [
    ("l", 1.0),
    ("ml", 1000.0),
    ("gal", 0.264_172),
    ("qt", 1.056_69),
    ("pt", 2.113_38),
    ("cup", 4.226_75),
];

fn factor(table: &[(&str, f64)], unit: &str) -> CoreResult<f64> {
    table
        .iter()
        .find(|(name, _)| *name == unit)
        .map(|(_, factor)| *factor)
        .ok_or_else(|| CoreError::InvalidInput(format!("unknown unit: {unit}")))
}

/// Convert between two units of the same category.
pub fn convert(category: &str, value: f64, from: &str, to: &str) -> CoreResult<f64> {
    match category {
        "length" => convert_by_factor(&LENGTH, value, from, to),
        "weight" => convert_by_factor(&WEIGHT, value, from, to),
        "volume" => convert_by_factor(&VOLUME, value, from, to),
        "temperature" => convert_temperature(value, from, to),
        other => Err(CoreError::InvalidInput(format!(
            "unknown category: {other}"
        ))),
    }
}

fn convert_by_factor(table: &[(&str, f64)], value: f64, from: &str, to: &str) -> CoreResult<f64> {
    let base = value / factor(table, from)?;
    Ok(base * factor(table, to)?)
}

/// Temperature goes through Celsius.
pub fn convert_temperature(value: f64, from: &str, to: &str) -> CoreResult<f64> {
    let celsius = match from {
        "C" => value,
        "F" => (value - 32.0) * 5.0 / 9.0,
        "K" => value - 273.15,
        other => {
            return Err(CoreError::InvalidInput(format!(
                "unknown temperature unit: {other}"
            )))
        }
    };
    match to {
        "C" => Ok(celsius),
        "F" => Ok(celsius * 9.0 / 5.0 + 32.0),
        "K" => Ok(celsius + 273.15),
        other => Err(CoreError::InvalidInput(format!(
            "unknown temperature unit: {other}"
        ))),
    }
}

pub fn tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: TOOL_ID.to_string(),
        title: "Unit Converter".to_string(),
        icon: "🔄".to_string(),
        keywords: vec!["units".into(), "convert".into(), "measure".into()],
        input_schema: json!({
            "type": "object",
            "required": ["category", "value", "from", "to"],
            "properties": {
                "category": {"type": "string"},
                "value": {"type": "number"},
                "from": {"type": "string"},
                "to": {"type": "string"}
            }
        }),
        output_schema: json!({
            "type": "object",
            "properties": {
                "result": {"type": "number"}
            }
        }),
        handler: Box::new(|args, _ctx| {
            let category = args.get("category").and_then(|v| v.as_str()).unwrap_or("");
            let value = args.get("value").and_then(|v| v.as_f64()).unwrap_or(0.0);
            let from = args.get("from").and_then(|v| v.as_str()).unwrap_or("");
            let to = args.get("to").and_then(|v| v.as_str()).unwrap_or("");
            let result = convert(category, value, from, to)?;
            Ok(json!({ "result": result }))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn metres_to_feet() {
        assert!(close(convert("length", 1.0, "m", "ft").unwrap(), 3.28084));
    }

    #[test]
    fn kilometres_to_miles() {
        assert!(close(convert("length", 10.0, "km", "mi").unwrap(), 6.21371));
    }

    #[test]
    fn kilograms_to_pounds() {
        assert!(close(convert("weight", 2.0, "kg", "lb").unwrap(), 4.40924));
    }

    #[test]
    fn litres_to_cups() {
        assert!(close(convert("volume", 1.0, "l", "cup").unwrap(), 4.22675));
    }

    #[test]
    fn same_unit_is_identity() {
        assert!(close(convert("length", 42.0, "cm", "cm").unwrap(), 42.0));
    }

    #[test]
    fn celsius_fahrenheit_round_trip() {
        assert!(close(convert_temperature(100.0, "C", "F").unwrap(), 212.0));
        assert!(close(convert_temperature(32.0, "F", "C").unwrap(), 0.0));
        assert!(close(convert_temperature(0.0, "C", "K").unwrap(), 273.15));
        assert!(close(convert_temperature(300.0, "K", "F").unwrap(), 80.33));
    }

    #[test]
    fn unknown_unit_rejected() {
        assert!(convert("length", 1.0, "m", "furlong").is_err());
        assert!(convert("temperature", 1.0, "C", "R").is_err());
        assert!(convert("sound", 1.0, "db", "db").is_err());
    }
}
