use std::iter::FusedIterator;

use super::{
    cursor::Cursor,
    kinds::{BANG, InlineEmbed, WikiEmbed},
    span::Span,
    types::{EmbedKind, LinkOccurrence},
};

/// Lazy iterator over the embeds in a piece of text.
///
/// Holds nothing but a cursor into the borrowed text, so scanning is
/// restartable: call [`scan`] again for a fresh pass.
#[derive(Clone)]
pub struct Scanner<'a> {
    cur: Cursor<'a>,
}

/// Scans `text` for embeds, yielding them in document order.
pub fn scan(text: &str) -> Scanner<'_> {
    scan_from(0, text)
}

/// Like [`scan`], but spans are offset by `base`.
///
/// Useful when `text` is a slice of a larger buffer.
pub fn scan_from(base: usize, text: &str) -> Scanner<'_> {
    Scanner {
        cur: Cursor::new(text, base),
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = LinkOccurrence<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.cur.seek(BANG);
            if self.cur.eof() {
                return None;
            }
            // Wiki form first: `![[a]](b)` is a wiki embed followed by text.
            if let Some(occ) = try_scan_wiki_embed(&mut self.cur) {
                return Some(occ);
            }
            if let Some(occ) = try_scan_inline_embed(&mut self.cur) {
                return Some(occ);
            }
            self.cur.bump();
        }
    }
}

impl FusedIterator for Scanner<'_> {}

/// Attempts to scan `![[target]]` at the current position.
///
/// The target must be non-empty and cannot contain `]`.
/// On failure, cursor position is restored.
fn try_scan_wiki_embed<'a>(cur: &mut Cursor<'a>) -> Option<LinkOccurrence<'a>> {
    if !cur.starts_with(WikiEmbed::OPEN) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(WikiEmbed::OPEN.len());
    let target_start = cur.pos();
    let target_len = cur.eat_until(WikiEmbed::TARGET_STOP);
    let target_end = cur.pos();

    if target_len == 0 || !cur.starts_with(WikiEmbed::CLOSE) {
        *cur = saved;
        return None;
    }
    cur.bump_n(WikiEmbed::CLOSE.len());
    let end = cur.pos();

    Some(LinkOccurrence {
        kind: EmbedKind::WikiEmbed,
        raw: cur.slice(start, end),
        target: cur.slice(target_start, target_end),
        alt_text: None,
        span: Span { start, end },
    })
}

/// Attempts to scan `![alt](target)` at the current position.
///
/// Alt text may be empty and cannot contain `]`; the target must be
/// non-empty and cannot contain `)`. On failure, cursor position is restored.
fn try_scan_inline_embed<'a>(cur: &mut Cursor<'a>) -> Option<LinkOccurrence<'a>> {
    if !cur.starts_with(InlineEmbed::OPEN) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.pos();
    cur.bump_n(InlineEmbed::OPEN.len());
    let alt_start = cur.pos();
    cur.eat_until(InlineEmbed::ALT_CLOSE);
    let alt_end = cur.pos();

    if cur.peek() != Some(InlineEmbed::ALT_CLOSE) {
        *cur = saved;
        return None;
    }
    cur.bump(); // ]
    if cur.peek() != Some(InlineEmbed::TARGET_OPEN) {
        *cur = saved;
        return None;
    }
    cur.bump(); // (

    let target_start = cur.pos();
    let target_len = cur.eat_until(InlineEmbed::TARGET_CLOSE);
    let target_end = cur.pos();
    if target_len == 0 || cur.peek() != Some(InlineEmbed::TARGET_CLOSE) {
        *cur = saved;
        return None;
    }
    cur.bump(); // )
    let end = cur.pos();

    Some(LinkOccurrence {
        kind: EmbedKind::InlineEmbed,
        raw: cur.slice(start, end),
        target: cur.slice(target_start, target_end),
        alt_text: Some(cur.slice(alt_start, alt_end)),
        span: Span { start, end },
    })
}
