//! Security tools: password generator, strength meter, hash digests.

use rand::Rng;
use serde::Serialize;
use serde_json::json;
use sha2::{Digest, Sha256, Sha512};
use utoipa::ToSchema;

use crate::error::{CoreError, CoreResult};
use crate::tools::schema::ToolDefinition;

const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
const SYMBOLS: &str = "!@#$%^&*()_+~`|}{[]:;?><,./-=";

pub const MIN_LENGTH: usize = 6;
pub const MAX_LENGTH: usize = 32;

#[derive(Debug, Clone, Copy)]
pub struct PasswordOptions {
    pub length: usize,
    pub uppercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            length: 12,
            uppercase: true,
            digits: true,
            symbols: true,
        }
    }
}

/// Generate a password by sampling the enabled character sets. Lowercase is
/// always included.
pub fn generate_password<R: Rng>(rng: &mut R, options: PasswordOptions) -> CoreResult<String> {
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&options.length) {
        return Err(CoreError::InvalidInput(format!(
            "password length must be between {MIN_LENGTH} and {MAX_LENGTH}"
        )));
    }
    let mut charset = String::from(LOWER);
    if options.uppercase {
        charset.push_str(UPPER);
    }
    if options.digits {
        charset.push_str(DIGITS);
    }
    if options.symbols {
        charset.push_str(SYMBOLS);
    }
    let chars: Vec<char> = charset.chars().collect();
    Ok((0..options.length)
        .map(|_| chars[rng.gen_range(0..chars.len())])
        .collect())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StrengthReport {
    pub score: u8,
    pub label: String,
}

const STRENGTH_LABELS: [&str; 6] = ["Very Weak", "Weak", "Fair", "Good", "Strong", "Very Strong"];

/// Score 0..=5: length > 8, length > 12, an uppercase letter, a digit, a
/// symbol. Empty input scores 0 with an empty label.
pub fn password_strength(password: &str) -> StrengthReport {
    if password.is_empty() {
        return StrengthReport {
            score: 0,
            label: String::new(),
        };
    }
    let mut score = 0u8;
    if password.len() > 8 {
        score += 1;
    }
    if password.len() > 12 {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        score += 1;
    }
    StrengthReport {
        score,
        label: STRENGTH_LABELS[score as usize].to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HashReport {
    pub sha256: String,
    pub sha512: String,
}

/// Hex digests of the input. MD5 and SHA-1 are deliberately not offered.
pub fn hashes(input: &str) -> HashReport {
    let sha256 = Sha256::digest(input.as_bytes());
    let sha512 = Sha512::digest(input.as_bytes());
    HashReport {
        sha256: hex(&sha256),
        sha512: hex(&sha512),
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

pub fn password_generator_tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: "password-generator".to_string(),
        title: "Password Generator".to_string(),
        icon: "🔐".to_string(),
        keywords: vec!["secure".into(), "random".into()],
        input_schema: json!({
            "type": "object",
            "properties": {
                "length": {"type": "integer"},
                "uppercase": {"type": "boolean"},
                "digits": {"type": "boolean"},
                "symbols": {"type": "boolean"}
            }
        }),
        output_schema: json!({
            "type": "object",
            "properties": {"password": {"type": "string"}}
        }),
        handler: Box::new(|args, _ctx| {
            let defaults = PasswordOptions::default();
            let options = PasswordOptions {
                length: args
                    .get("length")
                    .and_then(|v| v.as_u64())
                    .map(|l| l as usize)
                    .unwrap_or(defaults.length),
                uppercase: args
                    .get("uppercase")
                    .and_then(|v| v.as_bool())
                    .unwrap_or(defaults.uppercase),
                digits: args
                    .get("digits")
                    .and_then(|v| v.as_bool())
                    .unwrap_or(defaults.digits),
                symbols: args
                    .get("symbols")
                    .and_then(|v| v.as_bool())
                    .unwrap_or(defaults.symbols),
            };
            let password = generate_password(&mut rand::thread_rng(), options)?;
            Ok(json!({ "password": password }))
        }),
    }
}

pub fn password_strength_tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: "password-strength".to_string(),
        title: "Password Strength".to_string(),
        icon: "🛡️".to_string(),
        keywords: vec!["meter".into(), "check".into()],
        input_schema: json!({
            "type": "object",
            "required": ["password"],
            "properties": {"password": {"type": "string"}}
        }),
        output_schema: json!({
            "type": "object",
            "properties": {
                "score": {"type": "integer"},
                "label": {"type": "string"}
            }
        }),
        handler: Box::new(|args, _ctx| {
            let password = args.get("password").and_then(|v| v.as_str()).unwrap_or("");
            let report = password_strength(password);
            serde_json::to_value(&report)
                .map_err(|e| CoreError::Internal(format!("strength serialize error: {e}")))
        }),
    }
}

pub fn hash_tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: "hash-generator".to_string(),
        title: "Hash Generator".to_string(),
        icon: "#️⃣".to_string(),
        keywords: vec!["sha256".into(), "digest".into(), "checksum".into()],
        input_schema: json!({
            "type": "object",
            "required": ["text"],
            "properties": {"text": {"type": "string"}}
        }),
        output_schema: json!({
            "type": "object",
            "properties": {
                "sha256": {"type": "string"},
                "sha512": {"type": "string"}
            }
        }),
        handler: Box::new(|args, _ctx| {
            let text = args.get("text").and_then(|v| v.as_str()).unwrap_or("");
            let report = hashes(text);
            serde_json::to_value(&report)
                .map_err(|e| CoreError::Internal(format!("hash serialize error: {e}")))
        }),
    }
}
