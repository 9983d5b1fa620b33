//! Finds markdown embeds (`![[target]]`, `![alt](target)`) whose target is not
//! an image and demotes them to plain links.
//!
//! ```rust
//! use unembed_engine::{ResolvedTarget, Rewriter};
//!
//! let resolver = |path: &str, _context: &str| Some(ResolvedTarget::from_path(path));
//! let outcome = Rewriter::default()
//!     .rewrite("![[notes.pdf]] ![[photo.png]]", "daily.md", &resolver)
//!     .unwrap();
//! assert_eq!(outcome.text, "[[notes.pdf]] ![[photo.png]]");
//! ```

pub mod editing;
pub mod io;
pub mod models;
pub mod parsing;
pub mod rewrite;
pub mod schedule;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{AppliedEdit, ApplyError, LineIndex, LinePosition, apply_replacements};
pub use models::{VaultEntry, VaultIndex};
pub use parsing::{EmbedKind, LinkOccurrence, Span, scan};
pub use rewrite::{
    DEFAULT_IMAGE_EXTENSIONS, ExtensionSet, Replacement, ResolvedTarget, Resolver, RewriteConfig,
    RewriteError, RewriteOutcome, Rewriter, compute_rewrites,
};
pub use schedule::Debouncer;
