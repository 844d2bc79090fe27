//! Decoding of client call expressions such as `sleep(50)`.
//!
//! This is the host's half of the contract: the dispatcher only ever sees the
//! decoded [`Value`]s.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::value::Value;

static CALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*\((.*)\)\s*$").expect("valid call regex")
});
static INT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+$").expect("valid integer regex"));
static FLOAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?([0-9]+\.[0-9]*|\.[0-9]+|[0-9]+(\.[0-9]*)?[eE][+-]?[0-9]+)$")
        .expect("valid float regex")
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExprError {
    #[error("malformed call expression: {0} (expected name(arg, ...))")]
    Malformed(String),
    #[error("empty argument at position {0}")]
    EmptyArgument(usize),
    #[error("unterminated quoted argument")]
    UnterminatedQuote,
    #[error("integer literal out of 32-bit range: {0}")]
    IntegerOutOfRange(String),
}

/// A decoded function call.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: String,
    pub args: Vec<Value>,
}

pub fn parse(input: &str) -> Result<Call, ExprError> {
    let captures = CALL_RE
        .captures(input)
        .ok_or_else(|| ExprError::Malformed(input.trim().to_string()))?;

    let name = captures[1].to_string();
    let inner = &captures[2];

    let args = if inner.trim().is_empty() {
        Vec::new()
    } else {
        split_args(inner)?
            .into_iter()
            .enumerate()
            .map(|(position, raw)| {
                if raw.is_empty() {
                    Err(ExprError::EmptyArgument(position))
                } else {
                    decode_literal(raw)
                }
            })
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok(Call { name, args })
}

/// Split on commas that sit outside quotes. Pieces come back trimmed.
fn split_args(inner: &str) -> Result<Vec<&str>, ExprError> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (idx, ch) in inner.char_indices() {
        match quote {
            Some(q) => {
                if escaped {
                    escaped = false;
                } else if ch == '\\' {
                    escaped = true;
                } else if ch == q {
                    quote = None;
                }
            }
            None => match ch {
                '"' | '\'' => quote = Some(ch),
                ',' => {
                    pieces.push(inner[start..idx].trim());
                    start = idx + ch.len_utf8();
                }
                _ => {}
            },
        }
    }

    if quote.is_some() {
        return Err(ExprError::UnterminatedQuote);
    }

    pieces.push(inner[start..].trim());
    Ok(pieces)
}

fn decode_literal(raw: &str) -> Result<Value, ExprError> {
    if let Some(text) = unquote(raw) {
        return Ok(Value::Str(text));
    }

    if INT_RE.is_match(raw) {
        return raw
            .parse::<i32>()
            .map(Value::Int32)
            .map_err(|_| ExprError::IntegerOutOfRange(raw.to_string()));
    }

    if FLOAT_RE.is_match(raw) {
        if let Ok(value) = raw.parse::<f64>() {
            return Ok(Value::Float64(value));
        }
    }

    Ok(Value::Str(raw.to_string()))
}

fn unquote(input: &str) -> Option<String> {
    let first = input.chars().next()?;
    if (first != '"' && first != '\'') || input.len() < 2 || !input.ends_with(first) {
        return None;
    }

    let inner = &input[first.len_utf8()..input.len() - first.len_utf8()];
    let mut out = String::with_capacity(inner.len());
    let mut escaped = false;

    for ch in inner.chars() {
        if escaped {
            out.push(ch);
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else {
            out.push(ch);
        }
    }

    if escaped {
        out.push('\\');
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integer_call() {
        let call = parse("sleep(50)").unwrap();
        assert_eq!(call.name, "sleep");
        assert_eq!(call.args, vec![Value::Int32(50)]);
    }

    #[test]
    fn parses_empty_and_multiple_arguments() {
        assert!(parse(" abort( ) ").unwrap().args.is_empty());

        let call = parse("error(1, -2.5, 'a,b', \"q\\\"x\", word)").unwrap();
        assert_eq!(
            call.args,
            vec![
                Value::Int32(1),
                Value::Float64(-2.5),
                Value::Str("a,b".to_string()),
                Value::Str("q\"x".to_string()),
                Value::Str("word".to_string()),
            ]
        );
    }

    #[test]
    fn exponent_literals_are_floats() {
        assert_eq!(parse("sleep(1e3)").unwrap().args, vec![Value::Float64(1000.0)]);
    }

    #[test]
    fn rejects_malformed_expressions() {
        assert!(matches!(parse("sleep 50"), Err(ExprError::Malformed(_))));
        assert!(matches!(parse("9sleep(1)"), Err(ExprError::Malformed(_))));
        assert_eq!(parse("sleep(1,)"), Err(ExprError::EmptyArgument(1)));
        assert_eq!(parse("sleep('x)"), Err(ExprError::UnterminatedQuote));
    }

    #[test]
    fn integers_beyond_i32_are_refused() {
        assert_eq!(
            parse("sleep(3000000000)"),
            Err(ExprError::IntegerOutOfRange("3000000000".to_string()))
        );
        assert_eq!(
            parse("sleep(-2147483648)").unwrap().args,
            vec![Value::Int32(i32::MIN)]
        );
    }
}
