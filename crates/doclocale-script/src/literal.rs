//! Decoding of JavaScript literal tokens into JSON values.

use serde_json::{Number, Value};

/// Largest integer a JavaScript number represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Decodes the body of an escape sequence token such as `\n` or `\u{1F600}`.
///
/// Unknown escapes decode to the escaped character itself, as in
/// non-strict JavaScript. Line continuations decode to nothing.
#[must_use]
pub(crate) fn decode_escape(token: &str) -> String {
    let Some(body) = token.strip_prefix('\\') else {
        return token.to_owned();
    };
    let mut chars = body.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let rest = chars.as_str();
    match first {
        'n' => "\n".to_owned(),
        't' => "\t".to_owned(),
        'r' => "\r".to_owned(),
        'b' => "\u{8}".to_owned(),
        'f' => "\u{c}".to_owned(),
        'v' => "\u{b}".to_owned(),
        '0' if rest.is_empty() => "\0".to_owned(),
        '\r' | '\n' | '\u{2028}' | '\u{2029}' => String::new(),
        'x' => code_point(rest, 16).unwrap_or_else(|| body.to_owned()),
        'u' => {
            let digits = rest
                .strip_prefix('{')
                .and_then(|inner| inner.strip_suffix('}'))
                .unwrap_or(rest);
            code_point(digits, 16).unwrap_or_else(|| body.to_owned())
        }
        other => {
            let mut decoded = String::from(other);
            decoded.push_str(rest);
            decoded
        }
    }
}

fn code_point(digits: &str, radix: u32) -> Option<String> {
    let value = u32::from_str_radix(digits, radix).ok()?;
    char::from_u32(value).map(String::from)
}

/// Parses a numeric literal token into a JSON number.
///
/// Integral values within the safe-integer range become JSON integers so
/// that `2` in the module compares equal to `2` in tests and settings.
/// Non-finite results yield `None`.
#[must_use]
pub(crate) fn parse_number(token: &str) -> Option<Value> {
    let cleaned: String = token.chars().filter(|c| *c != '_').collect();
    let lowered = cleaned.to_ascii_lowercase();
    let trimmed = lowered.strip_suffix('n').unwrap_or(&lowered);

    let radix_literal = [("0x", 16), ("0o", 8), ("0b", 2)]
        .iter()
        .find_map(|(prefix, radix)| trimmed.strip_prefix(prefix).map(|digits| (digits, *radix)));
    if let Some((digits, radix)) = radix_literal {
        return i64::from_str_radix(digits, radix)
            .ok()
            .map(|value| Value::Number(value.into()));
    }

    let value: f64 = trimmed.parse().ok()?;
    number_value(value)
}

/// Converts an `f64` into a JSON value, preferring integers.
#[must_use]
pub(crate) fn number_value(value: f64) -> Option<Value> {
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "value is integral and within the safe-integer range"
        )]
        let integer = value as i64;
        return Some(Value::Number(integer.into()));
    }
    Number::from_f64(value).map(Value::Number)
}

/// Renders a value the way `String(value)` would for literal values.
#[must_use]
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_owned(),
    }
}

/// JavaScript truthiness of a literal value.
#[must_use]
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
