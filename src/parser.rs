use std::str::FromStr;

use tracing::{debug, trace};

use crate::error::{ParseError, ParseErrorKind};
use crate::segment::Segment;
use crate::span::Span;
use crate::tenor::{Tenor, Unit};
use crate::tokenizer::{SegmentTokenizer, UNIT_SEPARATORS};

/// Largest value accepted for a single unit.
pub const MAX_UNIT_VALUE: u32 = i32::MAX as u32;

pub fn parse(text: &str) -> Result<Tenor, ParseError> {
    parse_segment(&Segment::new(text))
}

/// Parse without surfacing the reason for a failure.
///
/// Returns `(false, Tenor::ZERO)` when `text` is `None`, empty, or malformed.
pub fn try_parse(text: Option<&str>) -> (bool, Tenor) {
    match parse_segment(&Segment::from(text)) {
        Ok(tenor) => (true, tenor),
        Err(_) => (false, Tenor::ZERO),
    }
}

/// Parse a tenor out of an existing segment. Error spans are positions in
/// the segment's underlying source.
pub fn parse_segment(input: &Segment<'_>) -> Result<Tenor, ParseError> {
    let result = parse_units(input);
    if let Err(err) = &result {
        debug!(kind = ?err.kind, span = %err.span, "rejected tenor");
    }
    result
}

fn parse_units(input: &Segment<'_>) -> Result<Tenor, ParseError> {
    let Ok(tokenizer) = SegmentTokenizer::new(*input, UNIT_SEPARATORS) else {
        return Err(ParseError::new(ParseErrorKind::Absent, Span::default()));
    };
    if input.is_empty() {
        return Err(ParseError::new(ParseErrorKind::Empty, input.span()));
    }

    let mut slots: [Option<u32>; 4] = [None; 4];
    for token in &tokenizer {
        let span = token.segment.span();
        trace!(%span, separator = ?token.separator.map(char::from), "tenor token");

        let value = parse_value(&token.segment)?;
        let Some(unit) = token.separator.and_then(Unit::from_separator) else {
            return Err(ParseError::new(ParseErrorKind::MissingUnit, Span::at(span.end)));
        };

        let slot = &mut slots[unit.index()];
        if slot.is_some() {
            return Err(ParseError::new(
                ParseErrorKind::DuplicateUnit(unit),
                Span::new(span.start, span.end + 1),
            ));
        }
        *slot = Some(value);
    }

    let [years, months, weeks, days] = slots.map(|slot| slot.unwrap_or(0));
    Ok(Tenor::new(years, months, weeks, days))
}

/// Accumulate a run of ASCII digits, failing past [`MAX_UNIT_VALUE`].
fn parse_value(segment: &Segment<'_>) -> Result<u32, ParseError> {
    let start = segment.span().start;
    if segment.is_empty() {
        // The separator sits right where the number should have been.
        return Err(ParseError::new(
            ParseErrorKind::EmptyValue,
            Span::new(start, start + 1),
        ));
    }

    let mut value: u32 = 0;
    for (offset, &byte) in segment.as_bytes().iter().enumerate() {
        if !byte.is_ascii_digit() {
            let at = start + offset;
            return Err(ParseError::new(
                ParseErrorKind::InvalidDigit,
                Span::new(at, at + 1),
            ));
        }
        value = value
            .checked_mul(10)
            .and_then(|value| value.checked_add(u32::from(byte - b'0')))
            .filter(|value| *value <= MAX_UNIT_VALUE)
            .ok_or_else(|| ParseError::new(ParseErrorKind::Overflow, segment.span()))?;
    }
    Ok(value)
}

impl FromStr for Tenor {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        parse(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(tenor: Tenor) -> (u32, u32, u32, u32) {
        (tenor.years(), tenor.months(), tenor.weeks(), tenor.days())
    }

    fn kind_of(text: &str) -> ParseErrorKind {
        parse(text).unwrap_err().kind
    }

    #[test]
    fn parses_each_prefix_of_the_full_form() {
        assert_eq!(fields(parse("100y").unwrap()), (100, 0, 0, 0));
        assert_eq!(fields(parse("1y1m").unwrap()), (1, 1, 0, 0));
        assert_eq!(fields(parse("1y1m1w").unwrap()), (1, 1, 1, 0));
        assert_eq!(fields(parse("1y1m1w1d").unwrap()), (1, 1, 1, 1));
    }

    #[test]
    fn unit_order_does_not_matter() {
        assert_eq!(fields(parse("1d1w1m1y").unwrap()), (1, 1, 1, 1));
        assert_eq!(fields(parse("4d3w2m1y").unwrap()), (1, 2, 3, 4));
    }

    #[test]
    fn unit_letters_are_case_insensitive() {
        assert_eq!(fields(parse("2Y3M4W5D").unwrap()), (2, 3, 4, 5));
    }

    #[test]
    fn leading_zeros_are_accepted() {
        assert_eq!(fields(parse("007d").unwrap()), (0, 0, 0, 7));
        assert_eq!(fields(parse("0y").unwrap()), (0, 0, 0, 0));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(kind_of(""), ParseErrorKind::Empty);
        assert_eq!(kind_of("y1"), ParseErrorKind::EmptyValue);
        assert_eq!(kind_of("1ym"), ParseErrorKind::EmptyValue);
        assert_eq!(kind_of("1y1m1q"), ParseErrorKind::InvalidDigit);
        assert_eq!(kind_of("1y5"), ParseErrorKind::MissingUnit);
        assert_eq!(kind_of(" 1y"), ParseErrorKind::InvalidDigit);
        assert_eq!(kind_of("-1y"), ParseErrorKind::InvalidDigit);
        assert_eq!(kind_of("1y1y"), ParseErrorKind::DuplicateUnit(Unit::Years));
        assert_eq!(kind_of("1d2D"), ParseErrorKind::DuplicateUnit(Unit::Days));
    }

    #[test]
    fn overflow_is_detected_at_i32_max() {
        assert_eq!(parse("2147483647d").unwrap().days(), MAX_UNIT_VALUE);
        assert_eq!(kind_of("2147483648d"), ParseErrorKind::Overflow);
        assert_eq!(kind_of("99999999999999999999y"), ParseErrorKind::Overflow);
    }

    #[test]
    fn error_spans_point_at_the_offending_bytes() {
        assert_eq!(parse("1y1m1q").unwrap_err().span, Span::new(5, 6));
        assert_eq!(parse("1y5").unwrap_err().span, Span::at(3));
        assert_eq!(parse("3m1y2m").unwrap_err().span, Span::new(4, 6));
        assert_eq!(parse("1ym").unwrap_err().span, Span::new(2, 3));
    }

    #[test]
    fn try_parse_reports_failure_with_zero() {
        for input in [None, Some(""), Some("y1"), Some("1ym"), Some("1y1m1q"), Some("1y1y")] {
            let (ok, tenor) = try_parse(input);
            assert!(!ok, "{input:?} should not parse");
            assert_eq!(fields(tenor), (0, 0, 0, 0));
        }

        let (ok, tenor) = try_parse(Some("1y"));
        assert!(ok);
        assert_eq!(fields(tenor), (1, 0, 0, 0));
    }

    #[test]
    fn absent_segment_is_reported() {
        let err = parse_segment(&Segment::absent()).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Absent);
    }

    #[test]
    fn parses_a_subsegment_in_place() {
        let source = Segment::new("tenor=2w3d;");
        let tenor = parse_segment(&source.subsegment(6, 4)).unwrap();
        assert_eq!(fields(tenor), (0, 0, 2, 3));

        let err = parse_segment(&Segment::new("tenor=2w2w;").subsegment(6, 4)).unwrap_err();
        assert_eq!(err.span, Span::new(8, 10));
    }

    #[test]
    fn from_str_delegates_to_parse() {
        let tenor: Tenor = "6m".parse().unwrap();
        assert_eq!(fields(tenor), (0, 6, 0, 0));
    }
}
