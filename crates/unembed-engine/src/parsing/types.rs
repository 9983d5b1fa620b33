use super::span::Span;

/// Which embed syntax an occurrence was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmbedKind {
    /// `![[target]]`
    WikiEmbed,
    /// `![alt](target)`
    InlineEmbed,
}

/// One embed found by the scanner.
///
/// All text fields borrow from the scanned document. `target` is captured
/// verbatim (still percent-encoded); decoding happens at resolution time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOccurrence<'a> {
    pub kind: EmbedKind,
    /// The full matched text, `!` included.
    pub raw: &'a str,
    /// Link path as written.
    pub target: &'a str,
    /// Alt text of an inline embed (possibly empty); `None` for wiki embeds.
    pub alt_text: Option<&'a str>,
    /// Absolute byte span of `raw`.
    pub span: Span,
}
