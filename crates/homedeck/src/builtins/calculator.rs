//! Calculator: arithmetic expression evaluator with a scientific layer.

use serde_json::json;

use crate::error::{CoreError, CoreResult};
use crate::tools::schema::ToolDefinition;

/// Tool identifier.
pub const TOOL_ID: &str = "calculator";

pub fn tool() -> ToolDefinition {
    ToolDefinition {
        tool_id: TOOL_ID.to_string(),
        title: "Calculator".to_string(),
        icon: "🧮".to_string(),
        keywords: vec!["math".into(), "calc".into(), "compute".into()],
        input_schema: json!({
            "type": "object",
            "required": ["expression"],
            "properties": {
                "expression": {"type": "string"}
            }
        }),
        output_schema: json!({
            "type": "object",
            "properties": {
                "result": {"type": "number"},
                "expression": {"type": "string"}
            }
        }),
        handler: Box::new(|args, _ctx| {
            let expr = args
                .get("expression")
                .and_then(|v| v.as_str())
                .unwrap_or("");
            let result = evaluate(expr)?;
            Ok(json!({
                "result": result,
                "expression": expr
            }))
        }),
    }
}

// --- Expression evaluator ---

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    LParen,
    RParen,
}

/// Lexer: convert an expression string into tokens. Unknown characters are
/// an error here, unlike whitespace which is skipped.
fn lex(input: &str) -> CoreResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&ch) = chars.peek() {
        match ch {
            ' ' | '\t' | '\n' | '\r' => {
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut num_str = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_digit() || c == '.' {
                        num_str.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let n = num_str.parse::<f64>().map_err(|_| {
                    CoreError::InvalidInput(format!("malformed number: {num_str}"))
                })?;
                tokens.push(Token::Number(n));
            }
            'a'..='z' | 'A'..='Z' => {
                let mut ident = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_alphabetic() {
                        ident.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(ident.to_lowercase()));
            }
            '+' => { tokens.push(Token::Plus); chars.next(); }
            '-' => { tokens.push(Token::Minus); chars.next(); }
            '*' => { tokens.push(Token::Star); chars.next(); }
            '/' => { tokens.push(Token::Slash); chars.next(); }
            '%' => { tokens.push(Token::Percent); chars.next(); }
            '^' => { tokens.push(Token::Caret); chars.next(); }
            '(' => { tokens.push(Token::LParen); chars.next(); }
            ')' => { tokens.push(Token::RParen); chars.next(); }
            other => {
                return Err(CoreError::InvalidInput(format!(
                    "unexpected character: {other}"
                )));
            }
        }
    }

    Ok(tokens)
}

/// Evaluate an arithmetic expression string.
///
/// Supports `+ - * / %`, parentheses, unary minus, right-associative `^`,
/// the functions `sin cos tan sqrt` (radians), and the constants `pi`/`e`.
pub fn evaluate(input: &str) -> CoreResult<f64> {
    let tokens = lex(input)?;
    if tokens.is_empty() {
        return Err(CoreError::InvalidInput("empty expression".to_string()));
    }
    let mut pos = 0;
    let result = parse_expr(&tokens, &mut pos)?;
    if pos != tokens.len() {
        return Err(CoreError::InvalidInput(
            "unexpected tokens after expression".to_string(),
        ));
    }
    Ok(result)
}

/// Addition/subtraction level.
fn parse_expr(tokens: &[Token], pos: &mut usize) -> CoreResult<f64> {
    let mut left = parse_term(tokens, pos)?;
    while *pos < tokens.len() {
        match &tokens[*pos] {
            Token::Plus => {
                *pos += 1;
                left += parse_term(tokens, pos)?;
            }
            Token::Minus => {
                *pos += 1;
                left -= parse_term(tokens, pos)?;
            }
            _ => break,
        }
    }
    Ok(left)
}

/// Multiplication/division/modulo level.
fn parse_term(tokens: &[Token], pos: &mut usize) -> CoreResult<f64> {
    let mut left = parse_unary(tokens, pos)?;
    while *pos < tokens.len() {
        match &tokens[*pos] {
            Token::Star => {
                *pos += 1;
                left *= parse_unary(tokens, pos)?;
            }
            Token::Slash => {
                *pos += 1;
                let right = parse_unary(tokens, pos)?;
                if right == 0.0 {
                    return Err(CoreError::InvalidInput("division by zero".to_string()));
                }
                left /= right;
            }
            Token::Percent => {
                *pos += 1;
                let right = parse_unary(tokens, pos)?;
                if right == 0.0 {
                    return Err(CoreError::InvalidInput("modulo by zero".to_string()));
                }
                left %= right;
            }
            _ => break,
        }
    }
    Ok(left)
}

/// Unary minus. `-2^2` is `-(2^2)`.
fn parse_unary(tokens: &[Token], pos: &mut usize) -> CoreResult<f64> {
    if *pos < tokens.len() && tokens[*pos] == Token::Minus {
        *pos += 1;
        let val = parse_unary(tokens, pos)?;
        return Ok(-val);
    }
    parse_power(tokens, pos)
}

/// Exponentiation, right-associative: `2^3^2` is `2^(3^2)`.
fn parse_power(tokens: &[Token], pos: &mut usize) -> CoreResult<f64> {
    let base = parse_primary(tokens, pos)?;
    if *pos < tokens.len() && tokens[*pos] == Token::Caret {
        *pos += 1;
        let exponent = parse_unary(tokens, pos)?;
        return Ok(base.powf(exponent));
    }
    Ok(base)
}

/// Number, constant, function call, or parenthesized expression.
fn parse_primary(tokens: &[Token], pos: &mut usize) -> CoreResult<f64> {
    if *pos >= tokens.len() {
        return Err(CoreError::InvalidInput(
            "unexpected end of expression".to_string(),
        ));
    }

    match &tokens[*pos] {
        Token::Number(n) => {
            let val = *n;
            *pos += 1;
            Ok(val)
        }
        Token::Ident(name) => {
            let name = name.clone();
            *pos += 1;
            match name.as_str() {
                "pi" => Ok(std::f64::consts::PI),
                "e" => Ok(std::f64::consts::E),
                "sin" | "cos" | "tan" | "sqrt" => {
                    let arg = parse_paren(tokens, pos)?;
                    apply_function(&name, arg)
                }
                other => Err(CoreError::InvalidInput(format!(
                    "unknown identifier: {other}"
                ))),
            }
        }
        Token::LParen => parse_paren(tokens, pos),
        _ => Err(CoreError::InvalidInput("unexpected token".to_string())),
    }
}

fn parse_paren(tokens: &[Token], pos: &mut usize) -> CoreResult<f64> {
    if *pos >= tokens.len() || tokens[*pos] != Token::LParen {
        return Err(CoreError::InvalidInput(
            "expected opening parenthesis".to_string(),
        ));
    }
    *pos += 1;
    let val = parse_expr(tokens, pos)?;
    if *pos >= tokens.len() || tokens[*pos] != Token::RParen {
        return Err(CoreError::InvalidInput(
            "missing closing parenthesis".to_string(),
        ));
    }
    *pos += 1;
    Ok(val)
}

fn apply_function(name: &str, arg: f64) -> CoreResult<f64> {
    match name {
        "sin" => Ok(arg.sin()),
        "cos" => Ok(arg.cos()),
        "tan" => Ok(arg.tan()),
        "sqrt" => {
            if arg < 0.0 {
                return Err(CoreError::InvalidInput(
                    "square root of a negative number".to_string(),
                ));
            }
            Ok(arg.sqrt())
        }
        _ => Err(CoreError::Internal(format!("unhandled function {name}"))),
    }
}
