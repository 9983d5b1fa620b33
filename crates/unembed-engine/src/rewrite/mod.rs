//! # Rewrite Engine
//!
//! Turns scanned embeds into [`Replacement`]s. An embed is demoted to a plain
//! link when its target resolves and is not an image; everything else is
//! left as written.
//!
//! Per-occurrence trouble (undecodable path, unresolved target) is a skip,
//! never an error. Only malformed invocations, such as occurrences that do
//! not belong to the given text, surface as [`RewriteError`].

pub mod extensions;
pub mod resolver;
pub mod rewriter;

use std::borrow::Cow;

use thiserror::Error;

use crate::editing::ApplyError;
use crate::parsing::{
    EmbedKind, LinkOccurrence, Span,
    kinds::{InlineEmbed, WikiEmbed},
};

pub use extensions::{DEFAULT_IMAGE_EXTENSIONS, ExtensionSet};
pub use resolver::{ResolvedTarget, Resolver};
pub use rewriter::{RewriteOutcome, Rewriter};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RewriteError {
    #[error("occurrence {span:?} lies outside the text (length {len})")]
    OutOfBounds { span: Span, len: usize },
    #[error("occurrence {span:?} does not fall on character boundaries")]
    NotCharBoundary { span: Span },
    #[error("occurrence {span:?} does not match the text at that position")]
    Mismatch { span: Span },
    #[error("occurrence {span:?} overlaps or precedes the previous one ending at {previous_end}")]
    Unordered { span: Span, previous_end: usize },
    #[error(transparent)]
    Apply(#[from] ApplyError),
}

/// A single text edit: replace `span` of the original text with `new_text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub span: Span,
    pub new_text: String,
}

/// Per-call view of the caller-owned settings.
#[derive(Debug, Clone, Copy)]
pub struct RewriteConfig<'a> {
    pub image_extensions: &'a ExtensionSet,
    /// Fill an empty inline alt text with the target's display name.
    pub auto_fill_alt_text: bool,
}

/// Computes the replacements that demote non-image embeds in `text`.
///
/// `context` identifies the document (for relative link resolution) and is
/// handed to `resolver` unchanged. Occurrences must come from `text` in
/// ascending, non-overlapping order, as [`crate::parsing::scan`] yields them.
/// The result is sorted by start offset and can be applied in one pass.
pub fn compute_rewrites<'t, I, R>(
    text: &'t str,
    context: &str,
    occurrences: I,
    resolver: &R,
    config: RewriteConfig<'_>,
) -> Result<Vec<Replacement>, RewriteError>
where
    I: IntoIterator<Item = LinkOccurrence<'t>>,
    R: Resolver + ?Sized,
{
    let mut out = Vec::new();
    let mut previous_end = None;

    for occ in occurrences {
        check_occurrence(text, &occ, previous_end)?;
        previous_end = Some(occ.span.end);

        let Some(decoded) = decode_target(occ.target) else {
            log::debug!("skipping {:?}: path is not UTF-8 once decoded", occ.raw);
            continue;
        };
        let Some(target) = resolver
            .resolve(&decoded, context)
            .filter(|target| target.exists)
        else {
            log::debug!("skipping {:?}: target not found", occ.raw);
            continue;
        };
        if config.image_extensions.is_image(&target.extension) {
            continue;
        }

        let new_text = demote(&occ, &target, config.auto_fill_alt_text);
        // Demotion drops the `!`, so this only guards against future forms.
        if new_text == occ.raw {
            continue;
        }
        log::debug!("demoting {:?} to {:?}", occ.raw, new_text);
        out.push(Replacement {
            span: occ.span,
            new_text,
        });
    }

    Ok(out)
}

/// Builds the plain-link form of an embed.
///
/// The link path is always reused exactly as written, still encoded.
pub fn demote(
    occ: &LinkOccurrence<'_>,
    target: &ResolvedTarget,
    auto_fill_alt_text: bool,
) -> String {
    match occ.kind {
        EmbedKind::WikiEmbed => WikiEmbed::demoted(occ.target),
        EmbedKind::InlineEmbed => {
            let alt = match occ.alt_text.unwrap_or_default() {
                "" if auto_fill_alt_text => target.display_name.as_str(),
                alt => alt,
            };
            InlineEmbed::demoted(alt, occ.target)
        }
    }
}

/// Percent-decodes a link path. `None` if the bytes are not UTF-8.
///
/// Malformed escapes such as `%zz` pass through literally.
pub fn decode_target(target: &str) -> Option<Cow<'_, str>> {
    urlencoding::decode(target).ok()
}

fn check_occurrence(
    text: &str,
    occ: &LinkOccurrence<'_>,
    previous_end: Option<usize>,
) -> Result<(), RewriteError> {
    let span = occ.span;
    if span.start > span.end || span.end > text.len() {
        return Err(RewriteError::OutOfBounds {
            span,
            len: text.len(),
        });
    }
    if !text.is_char_boundary(span.start) || !text.is_char_boundary(span.end) {
        return Err(RewriteError::NotCharBoundary { span });
    }
    if &text[span.range()] != occ.raw {
        return Err(RewriteError::Mismatch { span });
    }
    if let Some(previous_end) = previous_end
        && span.start < previous_end
    {
        return Err(RewriteError::Unordered { span, previous_end });
    }
    Ok(())
}
