//! Byte ranges into grammar or input text, for diagnostics.

use std::ops::Range;

/// A byte range in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span from a byte range
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }

    /// The span covering the symbol at char offset `offset` of `text`.
    ///
    /// Parses count symbols as `char`s while diagnostics render byte ranges;
    /// this bridges the two. An offset at or past the end yields an empty
    /// span at the end of the text.
    pub fn at_char(text: &str, offset: usize) -> Self {
        match text.char_indices().nth(offset) {
            Some((start, c)) => Self::new(start..start + c.len_utf8()),
            None => Self::new(text.len()..text.len()),
        }
    }

    /// Get the start offset of the span
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the end offset of the span
    pub fn end(&self) -> usize {
        self.end
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_char_ascii() {
        let span = Span::at_char("a -> b;", 2);

        assert_eq!(span.start(), 2);
        assert_eq!(span.len(), 1);
    }

    #[test]
    fn test_at_char_multibyte() {
        // 'é' is two bytes wide
        let span = Span::at_char("é -> x;", 1);

        assert_eq!(span.start(), 2);
        assert_eq!(span.end(), 3);
    }

    #[test]
    fn test_at_char_past_end() {
        let span = Span::at_char("ab", 5);

        assert_eq!(span, Span::new(2..2));
        assert!(span.is_empty());
    }
}
