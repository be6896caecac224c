//! Mixed-radix address literals and the literal/symbolic value split.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Parses an address literal in any supported notation to an integer.
///
/// Supported notations: `'h<hex>` / `0x<hex>`, `'b<bin>` / `0b<bin>`, and
/// plain decimal. Prefixes and hex digits are case-insensitive;
/// underscores between digits are ignored. Returns `None` for anything
/// else.
pub fn parse_literal(text: &str) -> Option<u64> {
    let clean: String = text.trim().chars().filter(|c| *c != '_').collect();
    let upper = clean.to_ascii_uppercase();

    let (digits, radix) = if let Some(rest) = upper.strip_prefix("'H").or(upper.strip_prefix("0X"))
    {
        (rest, 16)
    } else if let Some(rest) = upper.strip_prefix("'B").or(upper.strip_prefix("0B")) {
        (rest, 2)
    } else {
        (upper.as_str(), 10)
    };

    if digits.is_empty() {
        return None;
    }
    u64::from_str_radix(digits, radix).ok()
}

/// Normalizes an address literal to the canonical `'h<HEX>` form.
///
/// Unrecognized text is returned unchanged; callers treat an unchanged
/// value as "could not normalize" and keep the symbolic form. Normalizing
/// an already-canonical literal yields the same literal.
pub fn normalize(text: &str) -> String {
    match parse_literal(text) {
        Some(value) => format!("'h{value:X}"),
        None => text.to_string(),
    }
}

/// An address value: either a concrete integer or unevaluated expression text.
///
/// Downstream code cannot accidentally perform integer arithmetic on an
/// unparsed expression; arithmetic helpers degrade to symbolic text when
/// either operand is symbolic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddrValue {
    /// A concrete address.
    Literal(u64),
    /// Unevaluated expression text, passed through verbatim.
    Symbolic(String),
}

impl AddrValue {
    /// Parses text into a literal when possible, symbolic otherwise.
    pub fn parse(text: &str) -> Self {
        match parse_literal(text) {
            Some(value) => AddrValue::Literal(value),
            None => AddrValue::Symbolic(text.trim().to_string()),
        }
    }

    /// Returns the concrete value, if this is a literal.
    pub fn as_literal(&self) -> Option<u64> {
        match self {
            AddrValue::Literal(value) => Some(*value),
            AddrValue::Symbolic(_) => None,
        }
    }

    /// Returns `true` if this is a concrete literal.
    pub fn is_literal(&self) -> bool {
        matches!(self, AddrValue::Literal(_))
    }

    /// Renders the value padded to at least `digits` hex digits.
    ///
    /// Symbolic values render verbatim; padding only applies to literals.
    pub fn to_padded_hex(&self, digits: usize) -> String {
        match self {
            AddrValue::Literal(value) => format!("'h{value:0>width$X}", width = digits),
            AddrValue::Symbolic(text) => text.clone(),
        }
    }
}

impl fmt::Display for AddrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddrValue::Literal(value) => write!(f, "'h{value:X}"),
            AddrValue::Symbolic(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_notations_normalize_to_canonical() {
        for input in ["0x1A", "'h1A", "'b11010", "0b11010", "26"] {
            assert_eq!(normalize(input), "'h1A", "input {input}");
        }
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize("0xDEAD_BEEF");
        assert_eq!(once, "'hDEADBEEF");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn lowercase_prefixes_and_digits() {
        assert_eq!(parse_literal("'hff"), Some(255));
        assert_eq!(parse_literal("0Xff"), Some(255));
        assert_eq!(parse_literal("'B101"), Some(5));
    }

    #[test]
    fn unrecognized_text_is_unchanged() {
        assert_eq!(normalize("BASE_ADDR + 4"), "BASE_ADDR + 4");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("'h"), "'h");
        assert_eq!(normalize("0xZZ"), "0xZZ");
    }

    #[test]
    fn underscores_are_ignored() {
        assert_eq!(parse_literal("'h1000_0000"), Some(0x1000_0000));
        assert_eq!(parse_literal("1_000"), Some(1000));
    }

    #[test]
    fn addr_value_parse_splits_literal_and_symbolic() {
        assert_eq!(AddrValue::parse("0x20"), AddrValue::Literal(0x20));
        assert_eq!(
            AddrValue::parse(" MEM_BASE "),
            AddrValue::Symbolic("MEM_BASE".to_string())
        );
    }

    #[test]
    fn addr_value_display() {
        assert_eq!(AddrValue::Literal(0x1A).to_string(), "'h1A");
        assert_eq!(AddrValue::Symbolic("start + size".into()).to_string(), "start + size");
    }

    #[test]
    fn padded_hex() {
        assert_eq!(AddrValue::Literal(0x200).to_padded_hex(4), "'h0200");
        assert_eq!(AddrValue::Literal(0x12345).to_padded_hex(4), "'h12345");
        assert_eq!(
            AddrValue::Symbolic("RANGE".into()).to_padded_hex(4),
            "RANGE"
        );
    }
}
