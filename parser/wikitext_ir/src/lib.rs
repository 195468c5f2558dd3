//! Wikitext IR - syntax tree types
//!
//! This crate contains the data structures shared across the wikitext
//! pipeline:
//! - `Node`, the closed tagged union of syntax elements
//! - `Parameter` and `Attribute` extras for Template and Tag nodes
//! - `Wikitext`, the ordered tree of nodes every child sequence uses
//! - `ViewList`, the live-view list container backing `Wikitext`
//! - `Token` and `TokenList`, the lexer-output grammar
//!
//! # Design Philosophy
//!
//! - **Purely structural**: trees round-trip markup order exactly; no
//!   semantic validation, no deduplication, no key resolution.
//! - **Reference semantics at the seams**: cloning a tree or a node is a
//!   handle clone; storage is owned once, by the root list.
//! - **Single writer**: no internal synchronization; hosts serialize
//!   access to a tree and its views externally.

mod error;
mod extras;
mod list;
mod node;
mod token;
mod tree;

pub use error::ListError;
pub use extras::{Attribute, Parameter};
pub use list::ViewList;
pub use node::{EntityForm, HeadingLevel, HeadingLevelError, Node};
pub use token::{Token, TokenList};
pub use tree::Wikitext;
