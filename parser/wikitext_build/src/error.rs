//! Structure errors.
//!
//! The lexer guarantees balanced, correctly nested markers; anything
//! that violates that contract is fatal. `build` never returns a
//! partial tree.

use thiserror::Error;

/// Fatal failure while reducing a token stream into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A separator or equals marker arrived outside a construct that
    /// accepts it.
    #[error("stray {0} marker")]
    StrayMarker(&'static str),

    /// A close marker arrived with no matching open construct on the
    /// stack.
    #[error("{found} marker does not close the open construct")]
    MismatchedClose { found: &'static str },

    /// A structural marker arrived inside a comment or entity, whose
    /// interiors are text-only.
    #[error("{0} marker inside a text-only construct")]
    MarkerInTextInterior(&'static str),

    /// The stream ended with constructs still open.
    #[error("{0} construct(s) left open at end of stream")]
    UnclosedConstructs(usize),

    /// The deferred tag marker family; tag grammar is unfinished
    /// upstream.
    #[error("tag markup is not supported")]
    UnsupportedTag,
}
