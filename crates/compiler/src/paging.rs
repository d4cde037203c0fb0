use crate::{CompileError, directive::Directive, options::IntegerParsing};
use dirq_syntax::ast::{expr::Expression, literal::Literal};

/// Compiles the single argument of `limit` or `offset`.
pub(crate) fn compile_count(
    directive: Directive,
    arguments: &[Expression],
    mode: IntegerParsing,
) -> Result<u64, CompileError> {
    let [argument] = arguments else {
        return Err(CompileError::ArityMismatch {
            directive,
            expected: "exactly 1",
            found: arguments.len(),
        });
    };

    let invalid = CompileError::InvalidIntegerArgument {
        directive,
        offset: argument.offset(),
    };

    let text = match argument.as_literal() {
        Some(Literal::String(s)) => s.clone(),
        Some(Literal::Number(n)) => number_text(*n),
        _ => return Err(invalid),
    };

    parse_count(&text, mode).ok_or(invalid)
}

/// Textual form of a number literal, switching to exponent notation at or
/// above 1e21 and below 1e-6 (`1e+21`, `1e-7`).
pub(crate) fn number_text(n: f64) -> String {
    let magnitude = n.abs();
    if n == 0.0 || !n.is_finite() || (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }

    let exponent = format!("{:e}", n);
    match exponent.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exponent,
    }
}

/// Reads a non-negative integer from `text`.
///
/// Lenient mode takes the leading run of digits after an optional sign and
/// ignores the rest. A `0x` prefix switches to hexadecimal and must be
/// followed by at least one hex digit. Strict mode accepts decimal digits
/// only and requires them to end the text. Values past `u64` are rejected.
pub(crate) fn parse_count(text: &str, mode: IntegerParsing) -> Option<u64> {
    let trimmed = text.trim();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let hex = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"));
    let (digits, radix) = match (mode, hex) {
        (IntegerParsing::Lenient, Some(rest)) => (rest, 16),
        _ => (unsigned, 10),
    };

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 || (mode == IntegerParsing::Strict && end != digits.len()) {
        return None;
    }

    let value = u64::from_str_radix(&digits[..end], radix).ok()?;
    // -0 is zero, anything else below it is rejected
    if negative && value != 0 {
        return None;
    }

    Some(value)
}
