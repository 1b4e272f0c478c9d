//! Parse error type.

use thiserror::Error;

/// A structured parse failure carrying the offending token's position.
///
/// The parser surfaces the first failure it encounters and does not attempt
/// recovery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error at line {line} col {col}: {message}")]
pub struct ParseError {
    /// Human-readable expectation message.
    pub message: String,
    /// Byte offset of the offending token.
    pub pos: u32,
    /// 1-based line of the offending token.
    pub line: u32,
    /// 1-based column of the offending token.
    pub col: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let err = ParseError {
            message: String::from("expected identifier"),
            pos: 7,
            line: 1,
            col: 8,
        };
        assert_eq!(
            err.to_string(),
            "parse error at line 1 col 8: expected identifier"
        );
    }
}
