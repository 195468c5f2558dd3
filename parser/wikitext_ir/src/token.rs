//! Marker tokens produced by the external lexical scanner.
//!
//! The scanner guarantees balanced open/close markers and correct
//! nesting; the builder treats any violation as a fatal structure error
//! rather than re-validating lexical well-formedness.

use crate::node::{EntityForm, HeadingLevel};

/// One atomic lexical unit: literal text, or a structural marker scoped
/// to one construct kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// Literal text run.
    Text(String),

    /// `{{`
    TemplateOpen,
    /// `|` between template segments
    TemplateParamSeparator,
    /// `=` between a parameter key and value
    TemplateParamEquals,
    /// `}}`
    TemplateClose,

    /// `{{{`
    ArgumentOpen,
    /// `|` before an argument default
    ArgumentSeparator,
    /// `}}}`
    ArgumentClose,

    /// `[[`
    WikilinkOpen,
    /// `|` before link text
    WikilinkSeparator,
    /// `]]`
    WikilinkClose,

    /// `&` opening an entity; the form rides on the open marker and the
    /// entity value arrives as interior text.
    HtmlEntityOpen { form: EntityForm },
    /// `;` closing an entity
    HtmlEntityClose,

    /// Run of `=` opening a heading at the given depth
    HeadingOpen { level: HeadingLevel },
    /// Matching run of `=` closing the heading
    HeadingClose,

    /// `<!--`
    CommentOpen,
    /// `-->`
    CommentClose,

    /// Tag markers. Deferred: the tag grammar is unfinished upstream and
    /// the builder rejects these outright.
    TagOpen,
    /// See [`Token::TagOpen`].
    TagClose,
}

impl Token {
    /// Short human-readable name, used in structure error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Token::Text(_) => "text",
            Token::TemplateOpen => "template open",
            Token::TemplateParamSeparator => "template parameter separator",
            Token::TemplateParamEquals => "template parameter equals",
            Token::TemplateClose => "template close",
            Token::ArgumentOpen => "argument open",
            Token::ArgumentSeparator => "argument separator",
            Token::ArgumentClose => "argument close",
            Token::WikilinkOpen => "wikilink open",
            Token::WikilinkSeparator => "wikilink separator",
            Token::WikilinkClose => "wikilink close",
            Token::HtmlEntityOpen { .. } => "entity open",
            Token::HtmlEntityClose => "entity close",
            Token::HeadingOpen { .. } => "heading open",
            Token::HeadingClose => "heading close",
            Token::CommentOpen => "comment open",
            Token::CommentClose => "comment close",
            Token::TagOpen => "tag open",
            Token::TagClose => "tag close",
        }
    }
}

/// Ordered lexer output consumed by the builder.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    /// Create an empty token list.
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    /// Create from a Vec of tokens.
    pub fn from_vec(tokens: Vec<Token>) -> Self {
        TokenList { tokens }
    }

    /// Append a token.
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over tokens.
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Consume into the underlying Vec.
    pub fn into_vec(self) -> Vec<Token> {
        self.tokens
    }
}

impl From<Vec<Token>> for TokenList {
    fn from(tokens: Vec<Token>) -> Self {
        TokenList::from_vec(tokens)
    }
}

impl IntoIterator for TokenList {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
