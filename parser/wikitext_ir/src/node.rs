//! Syntax tree node kinds.
//!
//! `Node` is a closed tagged union: every consumer matches exhaustively,
//! so adding a kind surfaces every missing case at compile time instead
//! of falling through virtual dispatch.

use std::fmt;

use thiserror::Error;

use crate::extras::{Attribute, Parameter};
use crate::tree::Wikitext;

/// One element of a wikitext document.
///
/// Variants that own child trees hold them as [`Wikitext`] sequences, so
/// the whole structure is a tree of live-view lists. Cloning a node is
/// shallow with respect to those child trees (handles are cloned, storage
/// is shared); equality is deep.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Literal text run. Adjacent runs from the lexer are kept as
    /// separate nodes, in order.
    Text { value: String },
    /// Template transclusion: `{{name|params...}}`.
    Template {
        name: Wikitext,
        params: Vec<Parameter>,
    },
    /// Template argument: `{{{name}}}` or `{{{name|default}}}`.
    ///
    /// `default` is `None` when no separator was present, which is
    /// distinct from an empty default tree.
    Argument {
        name: Wikitext,
        default: Option<Wikitext>,
    },
    /// Internal link: `[[title]]` or `[[title|text]]`.
    Wikilink {
        title: Wikitext,
        text: Option<Wikitext>,
    },
    /// HTML character entity, e.g. `&nbsp;`, `&#107;`, `&#x6b;`.
    HtmlEntity { value: String, form: EntityForm },
    /// Section heading: `== title ==` through six levels.
    Heading {
        level: HeadingLevel,
        title: Wikitext,
    },
    /// HTML comment: `<!-- contents -->`. Contents are raw text.
    Comment { contents: String },
    /// HTML tag. Placeholder: the tag grammar is unfinished upstream and
    /// the builder does not produce this variant; it exists so trees
    /// built by hand can already carry tags.
    Tag {
        name: Wikitext,
        attributes: Vec<Attribute>,
        contents: Option<Wikitext>,
    },
}

impl Node {
    /// Convenience constructor for a text node.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text {
            value: value.into(),
        }
    }
}

/// Syntactic form of an HTML entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityForm {
    /// Named reference: `&nbsp;`
    Named,
    /// Decimal numeric reference: `&#107;`
    Decimal,
    /// Hexadecimal numeric reference: `&#x6b;`
    Hex,
}

/// Heading depth, 1 through 6.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    /// Create a level, rejecting anything outside `1..=6`.
    pub fn new(level: u8) -> Result<Self, HeadingLevelError> {
        if (1..=6).contains(&level) {
            Ok(HeadingLevel(level))
        } else {
            Err(HeadingLevelError(level))
        }
    }

    /// The raw depth.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A heading depth outside `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("heading level {0} is outside 1..=6")]
pub struct HeadingLevelError(pub u8);
