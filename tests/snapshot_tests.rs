use insta::{assert_debug_snapshot, assert_snapshot};
use tenor::Tenor;

#[test]
fn test_full_tenor_debug() {
    let tenor = tenor::parse("1d1w1m1y").unwrap();
    assert_debug_snapshot!(tenor, @r"
    Tenor {
        years: 1,
        months: 1,
        weeks: 1,
        days: 1,
        total_days: 398,
    }
    ");
}

#[test]
fn test_canonical_form_lowercases_units() {
    let tenor = tenor::parse("3D2W1M5Y").unwrap();
    assert_snapshot!(tenor.to_string(), @"5y1m2w3d");
}

#[test]
fn test_duplicate_unit_error() {
    let err = tenor::parse("1y1y").unwrap_err();
    assert_debug_snapshot!(err, @r"
    ParseError {
        kind: DuplicateUnit(
            Years,
        ),
        span: Span {
            start: 2,
            end: 4,
        },
    }
    ");
}

#[test]
fn test_human_readable_invalid_digit() {
    let source = "1y1m1q";
    let err = tenor::parse(source).unwrap_err();
    assert_snapshot!(err.to_human_readable(source.as_bytes()), @r"
    error: expected a decimal digit or a unit letter
      | 1y1m1q
      |      ^
    ");
}

#[test]
fn test_human_readable_missing_unit() {
    let source = "12m7";
    let err = tenor::parse(source).unwrap_err();
    assert_snapshot!(err.to_human_readable(source.as_bytes()), @r"
    error: number is not followed by a unit letter
      | 12m7
      |     ^
    ");
}

#[test]
fn test_error_display() {
    let err = tenor::parse("4294967296d").unwrap_err();
    assert_snapshot!(err.to_string(), @"value is larger than 2147483647 at 0..10");
}

#[test]
fn test_out_of_range_display() {
    let err = Tenor::try_new(0, -3, 0, 0).unwrap_err();
    assert_snapshot!(err.to_string(), @"months must be between 0 and 2147483647, got -3");
}
