use std::iter::FusedIterator;

use crate::error::TenorError;
use crate::segment::Segment;

/// Unit letters a tenor is split on, in both cases.
pub const UNIT_SEPARATORS: &[u8] = b"dDwWmMyY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub segment: Segment<'src>,
    /// Byte that ended the segment. `None` only for trailing input after the last separator.
    pub separator: Option<u8>,
}

/// Splits a [`Segment`] on a set of separator bytes.
///
/// Every call to [`SegmentTokenizer::tokens`] (or iterating `&tokenizer`)
/// starts again from the beginning of the segment.
#[derive(Debug, Clone, Copy)]
pub struct SegmentTokenizer<'src, 'sep> {
    value: Segment<'src>,
    separators: &'sep [u8],
}

impl<'src, 'sep> SegmentTokenizer<'src, 'sep> {
    pub fn new(value: Segment<'src>, separators: &'sep [u8]) -> Result<Self, TenorError> {
        if !value.has_value() {
            return Err(TenorError::AbsentInput);
        }
        Ok(Self { value, separators })
    }

    pub fn tokens(&self) -> Tokens<'src, 'sep> {
        Tokens {
            value: self.value,
            separators: self.separators,
            cursor: 0,
        }
    }
}

impl<'src, 'sep> IntoIterator for &SegmentTokenizer<'src, 'sep> {
    type Item = Token<'src>;
    type IntoIter = Tokens<'src, 'sep>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens()
    }
}

#[derive(Debug, Clone)]
pub struct Tokens<'src, 'sep> {
    value: Segment<'src>,
    separators: &'sep [u8],
    cursor: usize,
}

impl Tokens<'_, '_> {
    /// Rewind to the start of the segment.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

impl<'src> Iterator for Tokens<'src, '_> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Token<'src>> {
        if !self.value.has_value() || self.cursor >= self.value.len() {
            return None;
        }

        let (end, separator) = match self.value.index_of_any(self.separators, self.cursor) {
            Some(found) => (found, Some(self.value[found])),
            // No separator left, the remainder is the last token.
            None => (self.value.len(), None),
        };

        let token = Token {
            segment: self.value.subsegment(self.cursor, end - self.cursor),
            separator,
        };
        self.cursor = end + 1;
        Some(token)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.value.len().saturating_sub(self.cursor);
        (usize::from(remaining > 0), Some(remaining))
    }
}

impl FusedIterator for Tokens<'_, '_> {}
