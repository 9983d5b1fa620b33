use std::ops::Range;

use crate::editing::apply_replacements;
use crate::parsing::scan;

use super::{
    ExtensionSet, Replacement, Resolver, RewriteConfig, RewriteError, compute_rewrites,
};

/// Result of one full rewrite pass over a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// The document after every replacement was applied.
    pub text: String,
    /// Replacements in terms of the original text, ascending.
    pub replacements: Vec<Replacement>,
    /// Byte ranges of the inserted text in `text`.
    pub changed: Vec<Range<usize>>,
}

impl RewriteOutcome {
    pub fn count(&self) -> usize {
        self.replacements.len()
    }

    pub fn is_unchanged(&self) -> bool {
        self.replacements.is_empty()
    }
}

/// Owns the rewrite settings and runs scan, compute and apply in one call.
///
/// The extension set is rebuilt only when [`Rewriter::set_image_extensions`]
/// is called, not on every pass.
#[derive(Debug, Clone)]
pub struct Rewriter {
    image_extensions: ExtensionSet,
    auto_fill_alt_text: bool,
}

impl Default for Rewriter {
    fn default() -> Self {
        Self::new(ExtensionSet::default(), true)
    }
}

impl Rewriter {
    pub fn new(image_extensions: ExtensionSet, auto_fill_alt_text: bool) -> Self {
        Self {
            image_extensions,
            auto_fill_alt_text,
        }
    }

    /// Rebuilds the image extension set from a comma-separated list.
    pub fn set_image_extensions(&mut self, list: &str) {
        self.image_extensions = ExtensionSet::parse(list);
    }

    pub fn set_auto_fill_alt_text(&mut self, enabled: bool) {
        self.auto_fill_alt_text = enabled;
    }

    pub fn image_extensions(&self) -> &ExtensionSet {
        &self.image_extensions
    }

    pub fn auto_fill_alt_text(&self) -> bool {
        self.auto_fill_alt_text
    }

    pub fn config(&self) -> RewriteConfig<'_> {
        RewriteConfig {
            image_extensions: &self.image_extensions,
            auto_fill_alt_text: self.auto_fill_alt_text,
        }
    }

    /// Computes replacements for `text` without applying them.
    pub fn plan<R>(
        &self,
        text: &str,
        context: &str,
        resolver: &R,
    ) -> Result<Vec<Replacement>, RewriteError>
    where
        R: Resolver + ?Sized,
    {
        compute_rewrites(text, context, scan(text), resolver, self.config())
    }

    /// Computes replacements and applies them as a single edit.
    pub fn rewrite<R>(
        &self,
        text: &str,
        context: &str,
        resolver: &R,
    ) -> Result<RewriteOutcome, RewriteError>
    where
        R: Resolver + ?Sized,
    {
        let replacements = self.plan(text, context, resolver)?;
        if replacements.is_empty() {
            return Ok(RewriteOutcome {
                text: text.to_owned(),
                replacements,
                changed: Vec::new(),
            });
        }

        let applied = apply_replacements(text, &replacements)?;
        log::info!(
            "updated {} non-image link(s) in {context}",
            replacements.len()
        );
        Ok(RewriteOutcome {
            text: applied.text,
            replacements,
            changed: applied.changed,
        })
    }
}
