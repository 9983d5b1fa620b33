/*!
 * # Editing
 *
 * Applies a batch of [`Replacement`](crate::rewrite::Replacement)s to a text
 * buffer as one edit.
 *
 * All replacements compile into a single xi-rope `Delta`, so a host with
 * undo history sees the whole batch as one step. Replacements are expressed
 * in original-text offsets and must be sorted and non-overlapping, which is
 * what the rewrite engine produces.
 *
 * - **`apply`**: `apply_replacements` and its `AppliedEdit` result
 * - **`position`**: byte offset to line/column mapping and previews for reports
 */

pub mod apply;
pub mod position;

pub use apply::{AppliedEdit, ApplyError, apply_replacements};
pub use position::{LineIndex, LinePosition, preview};
