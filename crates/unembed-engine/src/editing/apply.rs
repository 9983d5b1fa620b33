use std::ops::Range;

use thiserror::Error;
use xi_rope::{Delta, Rope, RopeInfo, delta::Builder};

use crate::parsing::Span;
use crate::rewrite::Replacement;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApplyError {
    #[error("replacement {span:?} lies outside the text (length {len})")]
    OutOfBounds { span: Span, len: usize },
    #[error("replacement {span:?} does not fall on character boundaries")]
    NotCharBoundary { span: Span },
    #[error("replacement {span:?} overlaps or precedes the previous one ending at {previous_end}")]
    Unordered { span: Span, previous_end: usize },
}

/// Result of applying a batch of replacements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedEdit {
    pub text: String,
    /// Where each replacement's new text ended up in `text`.
    pub changed: Vec<Range<usize>>,
    pub count: usize,
}

/// Applies `replacements` to `text` as one delta.
///
/// Fails without touching anything if any replacement is out of bounds,
/// splits a character, or is not strictly after the one before it.
pub fn apply_replacements(
    text: &str,
    replacements: &[Replacement],
) -> Result<AppliedEdit, ApplyError> {
    validate(text, replacements)?;

    let buffer = Rope::from(text);
    let delta = compile(&buffer, replacements);
    let text = delta.apply(&buffer).to_string();

    // Shift each span by the net growth of everything before it.
    let mut changed = Vec::with_capacity(replacements.len());
    let mut growth: isize = 0;
    for r in replacements {
        let start = r.span.start.saturating_add_signed(growth);
        changed.push(start..start + r.new_text.len());
        growth += r.new_text.len() as isize - r.span.len() as isize;
    }

    Ok(AppliedEdit {
        text,
        changed,
        count: replacements.len(),
    })
}

fn compile(buffer: &Rope, replacements: &[Replacement]) -> Delta<RopeInfo> {
    let mut builder = Builder::new(buffer.len());
    for r in replacements {
        builder.replace(r.span.range(), Rope::from(r.new_text.as_str()));
    }
    builder.build()
}

fn validate(text: &str, replacements: &[Replacement]) -> Result<(), ApplyError> {
    let mut previous_end: Option<usize> = None;
    for r in replacements {
        let span = r.span;
        if span.start > span.end || span.end > text.len() {
            return Err(ApplyError::OutOfBounds {
                span,
                len: text.len(),
            });
        }
        if !text.is_char_boundary(span.start) || !text.is_char_boundary(span.end) {
            return Err(ApplyError::NotCharBoundary { span });
        }
        if let Some(previous_end) = previous_end
            && span.start < previous_end
        {
            return Err(ApplyError::Unordered { span, previous_end });
        }
        previous_end = Some(span.end);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rep(start: usize, end: usize, new_text: &str) -> Replacement {
        Replacement {
            span: Span { start, end },
            new_text: new_text.to_string(),
        }
    }

    #[test]
    fn applies_in_original_coordinates() {
        let text = "a ![[x.pdf]] b ![](y.pdf) c";
        let edit = apply_replacements(
            text,
            &[rep(2, 12, "[[x.pdf]]"), rep(15, 25, "[y](y.pdf)")],
        )
        .unwrap();
        assert_eq!(edit.text, "a [[x.pdf]] b [y](y.pdf) c");
        assert_eq!(edit.count, 2);
        assert_eq!(edit.changed, vec![2..11, 14..24]);
        assert_eq!(&edit.text[edit.changed[1].clone()], "[y](y.pdf)");
    }

    #[test]
    fn back_to_back_replacements() {
        let edit =
            apply_replacements("![[a]]![[b]]", &[rep(0, 6, "[[a]]"), rep(6, 12, "[[b]]")]).unwrap();
        assert_eq!(edit.text, "[[a]][[b]]");
        assert_eq!(edit.changed, vec![0..5, 5..10]);
    }

    #[test]
    fn empty_batch_is_identity() {
        let edit = apply_replacements("unchanged", &[]).unwrap();
        assert_eq!(edit.text, "unchanged");
        assert_eq!(edit.count, 0);
        assert!(edit.changed.is_empty());
    }

    #[test]
    fn multibyte_text_around_edits() {
        let text = "é ![[ü.pdf]] ñ";
        let start = text.find('!').unwrap();
        let end = start + "![[ü.pdf]]".len();
        let edit = apply_replacements(text, &[rep(start, end, "[[ü.pdf]]")]).unwrap();
        assert_eq!(edit.text, "é [[ü.pdf]] ñ");
    }

    #[test]
    fn rejects_overlap() {
        let err =
            apply_replacements("0123456789", &[rep(0, 5, "x"), rep(4, 6, "y")]).unwrap_err();
        assert_eq!(
            err,
            ApplyError::Unordered {
                span: Span { start: 4, end: 6 },
                previous_end: 5
            }
        );
    }

    #[test]
    fn rejects_out_of_bounds() {
        let err = apply_replacements("abc", &[rep(1, 9, "x")]).unwrap_err();
        assert!(matches!(err, ApplyError::OutOfBounds { len: 3, .. }));
    }

    #[test]
    fn rejects_split_character() {
        let err = apply_replacements("é", &[rep(1, 2, "x")]).unwrap_err();
        assert!(matches!(err, ApplyError::NotCharBoundary { .. }));
    }
}
