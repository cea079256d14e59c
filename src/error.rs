use thiserror::Error;

use crate::span::Span;
use crate::tenor::Unit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TenorError {
    /// A constructor argument was negative or is above `i32::MAX`.
    #[error("{field} must be between 0 and {max}, got {value}", max = i32::MAX)]
    OutOfRange { field: &'static str, value: i64 },

    #[error("cannot tokenize an absent input")]
    AbsentInput,

    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("no input was provided")]
    Absent,
    #[error("an empty string is not a valid tenor")]
    Empty,
    #[error("expected a number before the unit letter")]
    EmptyValue,
    #[error("expected a decimal digit or a unit letter")]
    InvalidDigit,
    #[error("value is larger than {max}", max = i32::MAX)]
    Overflow,
    #[error("number is not followed by a unit letter")]
    MissingUnit,
    #[error("the {0} unit appears more than once")]
    DuplicateUnit(Unit),
}

/// A rejected tenor string, with the byte range that caused the rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} at {span}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Render the error with the input on one line and carets under the offending bytes.
    pub fn to_human_readable(&self, source: &[u8]) -> String {
        let start = self.span.start.min(source.len());
        let end = self.span.end.clamp(start, source.len());
        let column = String::from_utf8_lossy(&source[..start]).chars().count();
        let width = String::from_utf8_lossy(&source[start..end]).chars().count().max(1);

        format!(
            "error: {}\n  | {}\n  | {}{}",
            self.kind,
            String::from_utf8_lossy(source),
            " ".repeat(column),
            "^".repeat(width)
        )
    }
}
