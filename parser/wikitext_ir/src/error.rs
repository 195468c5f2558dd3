//! List operation errors.

use thiserror::Error;

/// Failure of a [`ViewList`](crate::ViewList) or
/// [`Wikitext`](crate::Wikitext) operation.
///
/// These are caller errors, local and recoverable: a failed operation
/// never moves elements or corrupts sibling views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListError {
    /// A `[start, end)` pair outside the handle's current bounds.
    #[error("range [{start}, {end}) out of bounds for list of length {len}")]
    Range {
        start: usize,
        end: usize,
        len: usize,
    },

    /// A single index outside the handle's current bounds.
    #[error("index {index} out of bounds for list of length {len}")]
    Index { index: usize, len: usize },

    /// The view's root storage no longer exists; no operation on this
    /// handle can ever succeed again.
    #[error("view outlived its root list")]
    DeadView,
}
