use xi_rope::Rope;

use crate::parsing::Span;

/// Zero-based line and byte column of an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinePosition {
    pub line: usize,
    pub column: usize,
}

/// Maps byte offsets to line/column positions for one text snapshot.
///
/// Build once per document; lookups use the rope's line index.
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from(text),
        }
    }

    /// Offsets past the end clamp to the end of the text.
    pub fn position(&self, offset: usize) -> LinePosition {
        let offset = offset.min(self.rope.len());
        let line = self.rope.line_of_offset(offset);
        LinePosition {
            line,
            column: offset - self.rope.offset_of_line(line),
        }
    }
}

/// Extracts text for a span, truncating to at most `max` bytes with "..."
/// appended if needed. Never cuts a character in half.
pub fn preview(text: &str, span: Span, max: usize) -> String {
    let end = span.end.min(text.len());
    let start = span.start.min(end);
    let Some(s) = text.get(start..end) else {
        return String::new();
    };
    if s.len() <= max {
        return s.replace('\n', "\\n");
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", s[..cut].replace('\n', "\\n"))
}
