//! # Link Scanner
//!
//! Lazily lexes document text into [`LinkOccurrence`]s for the two embed
//! syntaxes, left to right and without overlap.
//!
//! ## Modules
//!
//! - **`span`**: `Span` byte ranges
//! - **`kinds`**: delimiter ownership for `WikiEmbed` and `InlineEmbed`
//! - **`cursor`**: `Cursor` for byte-by-byte scanning with position tracking
//! - **`scanner`**: the `Scanner` iterator with `try_scan_*` helpers
//! - **`types`**: `EmbedKind` and `LinkOccurrence`
//!
//! ## Matching rules
//!
//! At each `!` a wiki embed is tried first, then an inline embed. The first
//! one that closes wins and scanning resumes after it; otherwise the scanner
//! moves on by one byte. Inner segments may contain newlines. Anything not
//! starting with `!` is never a candidate, so plain `[[links]]` and
//! `[text](links)` are skipped over.

pub mod cursor;
pub mod kinds;
pub mod scanner;
pub mod span;
pub mod types;

pub use scanner::{Scanner, scan, scan_from};
pub use span::Span;
pub use types::{EmbedKind, LinkOccurrence};
