/// A byte range `[start, end)` into the document text.
///
/// Occurrences and replacements store spans rather than positions so a caller
/// can slice the original buffer and get the exact source back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    pub fn range(self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_and_empty() {
        assert_eq!(Span::new(3, 7).len(), 4);
        assert!(Span::new(5, 5).is_empty());
        // inverted spans are treated as empty rather than underflowing
        assert_eq!(Span::new(7, 3).len(), 0);
    }

    #[test]
    fn range_slices_source_text() {
        let text = "see ![[a.pdf]] here";
        assert_eq!(&text[Span::new(4, 14).range()], "![[a.pdf]]");
    }
}
