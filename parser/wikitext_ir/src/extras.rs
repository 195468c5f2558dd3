//! Key/value extras attached to Template and Tag nodes.

use crate::tree::Wikitext;

/// One template parameter.
///
/// `showkey == false` marks an implicit positional parameter: `name`
/// holds the computed numeral, which is bookkeeping rather than markup.
/// Duplicate keys (positional colliding with explicit, or two explicit
/// duplicates) are preserved as distinct entries; resolution is a
/// rendering-layer concern, not a structural one.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameter {
    pub name: Wikitext,
    pub value: Wikitext,
    pub showkey: bool,
}

impl Parameter {
    /// Create a parameter from fully-built name and value trees.
    pub fn new(name: Wikitext, value: Wikitext, showkey: bool) -> Self {
        Parameter {
            name,
            value,
            showkey,
        }
    }
}

/// One tag attribute, e.g. `class="wikitable"`.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    pub name: Wikitext,
    pub value: Option<Wikitext>,
    pub quoted: bool,
}

impl Attribute {
    /// Create an attribute from fully-built trees.
    pub fn new(name: Wikitext, value: Option<Wikitext>, quoted: bool) -> Self {
        Attribute {
            name,
            value,
            quoted,
        }
    }
}
