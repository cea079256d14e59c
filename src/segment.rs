use std::ops::Index;

use crate::span::Span;

/// A borrowed window over a byte buffer.
///
/// A segment never copies the bytes it covers: slicing it produces another
/// segment over the same source with a narrower [`Span`]. A segment built by
/// [`Segment::absent`] has no source at all, which is how a missing input is
/// told apart from an empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Segment<'src> {
    source: Option<&'src [u8]>,
    span: Span,
}

impl<'src> Segment<'src> {
    pub fn new(source: &'src str) -> Self {
        Self::from_bytes(source.as_bytes())
    }

    pub fn from_bytes(source: &'src [u8]) -> Self {
        Self {
            source: Some(source),
            span: Span::new(0, source.len()),
        }
    }

    pub const fn absent() -> Self {
        Self {
            source: None,
            span: Span { start: 0, end: 0 },
        }
    }

    /// True when the segment is backed by real input, even if that input is empty.
    pub fn has_value(&self) -> bool {
        self.source.is_some()
    }

    pub fn len(&self) -> usize {
        self.span.len()
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// Position of this segment inside the underlying source.
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn source(&self) -> Option<&'src [u8]> {
        self.source
    }

    pub fn as_bytes(&self) -> &'src [u8] {
        match self.source {
            Some(source) => self.span.as_str(source),
            None => &[],
        }
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.as_bytes().get(index).copied()
    }

    /// Narrow the view to `[start, start + length)`, relative to this segment.
    ///
    /// # Panics
    ///
    /// Panics if the requested range does not lie within this segment.
    pub fn subsegment(&self, start: usize, length: usize) -> Segment<'src> {
        let fits = start
            .checked_add(length)
            .is_some_and(|end| end <= self.len());
        assert!(
            fits,
            "subsegment {start}+{length} out of range for segment of length {}",
            self.len()
        );

        let begin = self.span.start + start;
        Segment {
            source: self.source,
            span: Span::new(begin, begin + length),
        }
    }

    /// Index, relative to this segment, of the first byte at or after `from`
    /// that belongs to `set`.
    ///
    /// Sets of up to three bytes are searched with `memchr`; larger sets, such
    /// as the eight unit letters, fall back to a single linear pass.
    ///
    /// # Panics
    ///
    /// Panics if `from` is greater than the segment length.
    pub fn index_of_any(&self, set: &[u8], from: usize) -> Option<usize> {
        let haystack = &self.as_bytes()[from..];
        let found = match *set {
            [] => None,
            [a] => memchr::memchr(a, haystack),
            [a, b] => memchr::memchr2(a, b, haystack),
            [a, b, c] => memchr::memchr3(a, b, c, haystack),
            _ => haystack.iter().position(|byte| set.contains(byte)),
        };
        found.map(|offset| from + offset)
    }
}

impl Index<usize> for Segment<'_> {
    type Output = u8;

    fn index(&self, index: usize) -> &u8 {
        &self.as_bytes()[index]
    }
}

impl<'src> From<&'src str> for Segment<'src> {
    fn from(source: &'src str) -> Self {
        Segment::new(source)
    }
}

impl<'src> From<Option<&'src str>> for Segment<'src> {
    fn from(source: Option<&'src str>) -> Self {
        source.map_or_else(Segment::absent, Segment::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_empty_are_distinct() {
        let absent = Segment::absent();
        let empty = Segment::new("");

        assert!(!absent.has_value());
        assert!(empty.has_value());
        assert_eq!(absent.len(), 0);
        assert_eq!(empty.len(), 0);
        assert_ne!(absent, empty);
    }

    #[test]
    fn subsegment_is_relative_to_parent() {
        let whole = Segment::new("12y34m");
        let months = whole.subsegment(3, 3);
        let digits = months.subsegment(0, 2);

        assert_eq!(months.as_bytes(), b"34m");
        assert_eq!(digits.as_bytes(), b"34");
        assert_eq!(digits.span(), Span::new(3, 5));
        assert_eq!(digits[1], b'4');
        assert_eq!(digits.get(2), None);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn subsegment_rejects_escaping_range() {
        Segment::new("1y").subsegment(1, 2);
    }

    #[test]
    #[should_panic]
    fn index_past_end_panics() {
        let segment = Segment::new("1y").subsegment(0, 1);
        let _byte = segment[1];
    }

    #[test]
    fn index_of_any_scans_from_offset() {
        let segment = Segment::new("1y2m3W");

        assert_eq!(segment.index_of_any(b"ym", 0), Some(1));
        assert_eq!(segment.index_of_any(b"ym", 2), Some(3));
        assert_eq!(segment.index_of_any(b"w", 0), None);
        assert_eq!(segment.index_of_any(b"dDwWmMyY", 4), Some(5));
        assert_eq!(segment.index_of_any(b"dDwWmMyY", 6), None);
        assert_eq!(segment.index_of_any(b"", 0), None);
    }

    #[test]
    fn index_of_any_is_relative_inside_subsegment() {
        let segment = Segment::new("9d12w").subsegment(2, 3);

        assert_eq!(segment.index_of_any(b"w", 0), Some(2));
        assert_eq!(segment.index_of_any(b"d", 0), None);
    }

    #[test]
    fn large_sets_agree_with_small_set_search() {
        let segment = Segment::new("12M3w4Y5d");
        for from in 0..=segment.len() {
            let large = segment.index_of_any(b"dDwWmMyY", from);
            let folded = [b"dD", b"wW", b"mM", b"yY"]
                .iter()
                .filter_map(|pair| segment.index_of_any(*pair, from))
                .min();
            assert_eq!(large, folded, "from {from}");
        }
    }

    #[test]
    fn from_option_maps_none_to_absent() {
        assert!(!Segment::from(None::<&str>).has_value());
        assert!(Segment::from(Some("")).has_value());
    }
}
