//! Builder stage: balanced marker tokens to a wikitext tree.
//!
//! Consumes the external lexer's [`TokenList`] and reduces it into an
//! editable [`Wikitext`] tree with an explicit frame stack. Input
//! balance and nesting are the lexer's contract; a violation is a fatal
//! [`BuildError`], never a recovery point, and `build` is all-or-nothing.

mod builder;
mod error;

#[cfg(test)]
mod tests;

pub use builder::Builder;
pub use error::BuildError;

use wikitext_ir::{TokenList, Wikitext};

/// Reduce a token stream into a document tree.
pub fn build(tokens: TokenList) -> Result<Wikitext, BuildError> {
    Builder::new().build(tokens)
}
