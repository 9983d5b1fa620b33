//! # Embed Kinds
//!
//! Each embed syntax owns its delimiters.
//!
//! - **`WikiEmbed`**: `![[target]]`
//! - **`InlineEmbed`**: `![alt](target)`
//!
//! The scanner calls these constants; it never hardcodes `[[` or `](`.

pub mod inline_embed;
pub mod wiki_embed;

pub use inline_embed::InlineEmbed;
pub use wiki_embed::WikiEmbed;

/// Marker that turns a link into an embed.
pub const BANG: u8 = b'!';
