//! Stack-driven reducer from marker tokens to a syntax tree.
//!
//! The stack holds one frame per open construct; the document root is
//! implicit. Tokens are processed left to right: text and finished
//! nodes land in the top frame's active slot, separators rotate slots,
//! and a close marker materializes the top frame into a node. An
//! explicit `Vec` of frames bounds auxiliary stack depth regardless of
//! markup nesting, and leaves a single place to detect unclosed
//! constructs at end of stream.
//!
//! Frames accumulate plain `Vec<Node>` slots; `Wikitext` storage is
//! only created when a construct closes, so no tree is ever observable
//! half-built.

use tracing::{debug, trace};

use wikitext_ir::{EntityForm, HeadingLevel, Node, Parameter, Token, TokenList, Wikitext};

use crate::error::BuildError;

/// A template parameter still collecting tokens. `key` stays `None`
/// until an equals marker promotes the accumulated value into it; a
/// parameter closed with `key == None` is positional.
#[derive(Default)]
struct ParamInProgress {
    key: Option<Vec<Node>>,
    value: Vec<Node>,
}

impl ParamInProgress {
    /// Materialize, assigning the next positional numeral when no
    /// explicit key was seen. Explicit keys never touch the counter.
    fn finish(self, positional: &mut usize) -> Parameter {
        match self.key {
            Some(key) => Parameter::new(
                Wikitext::from_nodes(key),
                Wikitext::from_nodes(self.value),
                true,
            ),
            None => {
                *positional += 1;
                Parameter::new(
                    Wikitext::from_text(positional.to_string()),
                    Wikitext::from_nodes(self.value),
                    false,
                )
            }
        }
    }
}

/// One open construct: its not-yet-finalized child slots.
enum Frame {
    Template {
        name: Vec<Node>,
        params: Vec<Parameter>,
        param: Option<ParamInProgress>,
        /// Count of positional parameters finished so far.
        positional: usize,
    },
    Argument {
        name: Vec<Node>,
        default: Option<Vec<Node>>,
    },
    Wikilink {
        title: Vec<Node>,
        text: Option<Vec<Node>>,
    },
    Heading {
        level: HeadingLevel,
        title: Vec<Node>,
    },
    Comment {
        contents: String,
    },
    Entity {
        form: EntityForm,
        value: String,
    },
}

impl Frame {
    fn describe(&self) -> &'static str {
        match self {
            Frame::Template { .. } => "template",
            Frame::Argument { .. } => "argument",
            Frame::Wikilink { .. } => "wikilink",
            Frame::Heading { .. } => "heading",
            Frame::Comment { .. } => "comment",
            Frame::Entity { .. } => "entity",
        }
    }

    /// The child slot currently collecting nodes.
    fn active_slot(&mut self) -> &mut Vec<Node> {
        match self {
            Frame::Template {
                param: Some(param), ..
            } => &mut param.value,
            Frame::Template { name, .. } => name,
            Frame::Argument {
                default: Some(default),
                ..
            } => default,
            Frame::Argument { name, .. } => name,
            Frame::Wikilink {
                text: Some(text), ..
            } => text,
            Frame::Wikilink { title, .. } => title,
            Frame::Heading { title, .. } => title,
            // Text-only interiors are guarded before any node can be
            // appended while one is on top.
            Frame::Comment { .. } | Frame::Entity { .. } => {
                unreachable!("text-only frame never receives nodes")
            }
        }
    }
}

/// Reduces a balanced marker stream into a [`Wikitext`] tree.
///
/// One-shot: [`Builder::build`] consumes the builder and either returns
/// a fully materialized tree or fails with a [`BuildError`]. There is no
/// partial result.
#[derive(Default)]
pub struct Builder {
    root: Vec<Node>,
    stack: Vec<Frame>,
}

impl Builder {
    /// Create a builder with an empty implicit document root.
    pub fn new() -> Self {
        Builder {
            root: Vec::new(),
            stack: Vec::new(),
        }
    }

    /// Consume `tokens` and materialize the document tree.
    pub fn build(mut self, tokens: TokenList) -> Result<Wikitext, BuildError> {
        for token in tokens {
            self.handle(token)?;
        }
        if !self.stack.is_empty() {
            return Err(BuildError::UnclosedConstructs(self.stack.len()));
        }
        debug!(nodes = self.root.len(), "built document");
        Ok(Wikitext::from_nodes(self.root))
    }

    fn handle(&mut self, token: Token) -> Result<(), BuildError> {
        // Comment and entity interiors accept only text and their own
        // close marker.
        match self.stack.last() {
            Some(Frame::Comment { .. }) => match &token {
                Token::Text(_) | Token::CommentClose => {}
                other => return Err(BuildError::MarkerInTextInterior(other.describe())),
            },
            Some(Frame::Entity { .. }) => match &token {
                Token::Text(_) | Token::HtmlEntityClose => {}
                other => return Err(BuildError::MarkerInTextInterior(other.describe())),
            },
            _ => {}
        }

        match token {
            Token::Text(value) => self.text(value),

            Token::TemplateOpen => self.open(Frame::Template {
                name: Vec::new(),
                params: Vec::new(),
                param: None,
                positional: 0,
            }),
            Token::ArgumentOpen => self.open(Frame::Argument {
                name: Vec::new(),
                default: None,
            }),
            Token::WikilinkOpen => self.open(Frame::Wikilink {
                title: Vec::new(),
                text: None,
            }),
            Token::HeadingOpen { level } => self.open(Frame::Heading {
                level,
                title: Vec::new(),
            }),
            Token::CommentOpen => self.open(Frame::Comment {
                contents: String::new(),
            }),
            Token::HtmlEntityOpen { form } => self.open(Frame::Entity {
                form,
                value: String::new(),
            }),

            Token::TemplateParamSeparator => return self.template_separator(),
            Token::TemplateParamEquals => return self.template_equals(),
            Token::TemplateClose => return self.close_template(),
            Token::ArgumentSeparator => return self.argument_separator(),
            Token::ArgumentClose => return self.close_argument(),
            Token::WikilinkSeparator => return self.wikilink_separator(),
            Token::WikilinkClose => return self.close_wikilink(),
            Token::HeadingClose => return self.close_heading(),
            Token::CommentClose => return self.close_comment(),
            Token::HtmlEntityClose => return self.close_entity(),

            Token::TagOpen | Token::TagClose => return Err(BuildError::UnsupportedTag),
        }
        Ok(())
    }

    fn text(&mut self, value: String) {
        match self.stack.last_mut() {
            Some(Frame::Comment { contents }) => contents.push_str(&value),
            Some(Frame::Entity { value: entity, .. }) => entity.push_str(&value),
            Some(frame) => frame.active_slot().push(Node::Text { value }),
            None => self.root.push(Node::Text { value }),
        }
    }

    fn open(&mut self, frame: Frame) {
        trace!(construct = frame.describe(), depth = self.stack.len(), "open");
        self.stack.push(frame);
    }

    /// Append a finished node to the enclosing frame's active slot, or
    /// to the implicit document root.
    fn emit(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(frame) => frame.active_slot().push(node),
            None => self.root.push(node),
        }
    }

    fn template_separator(&mut self) -> Result<(), BuildError> {
        let Some(Frame::Template {
            params,
            param,
            positional,
            ..
        }) = self.stack.last_mut()
        else {
            return Err(BuildError::StrayMarker("template parameter separator"));
        };
        // The first separator closes the name slot; each later one
        // finalizes the in-progress parameter.
        if let Some(done) = param.replace(ParamInProgress::default()) {
            params.push(done.finish(positional));
        }
        Ok(())
    }

    fn template_equals(&mut self) -> Result<(), BuildError> {
        match self.stack.last_mut() {
            Some(Frame::Template {
                param: Some(param), ..
            }) if param.key.is_none() => {
                // Promote the tentative value into the key; the value
                // slot starts fresh.
                param.key = Some(std::mem::take(&mut param.value));
                Ok(())
            }
            _ => Err(BuildError::StrayMarker("template parameter equals")),
        }
    }

    fn argument_separator(&mut self) -> Result<(), BuildError> {
        match self.stack.last_mut() {
            Some(Frame::Argument { default, .. }) if default.is_none() => {
                *default = Some(Vec::new());
                Ok(())
            }
            _ => Err(BuildError::StrayMarker("argument separator")),
        }
    }

    fn wikilink_separator(&mut self) -> Result<(), BuildError> {
        match self.stack.last_mut() {
            Some(Frame::Wikilink { text, .. }) if text.is_none() => {
                *text = Some(Vec::new());
                Ok(())
            }
            _ => Err(BuildError::StrayMarker("wikilink separator")),
        }
    }

    fn close_template(&mut self) -> Result<(), BuildError> {
        match self.pop("template close")? {
            Frame::Template {
                name,
                mut params,
                param,
                mut positional,
            } => {
                if let Some(done) = param {
                    params.push(done.finish(&mut positional));
                }
                self.emit(Node::Template {
                    name: Wikitext::from_nodes(name),
                    params,
                });
                Ok(())
            }
            other => Err(Self::mismatch("template close", &other)),
        }
    }

    fn close_argument(&mut self) -> Result<(), BuildError> {
        match self.pop("argument close")? {
            Frame::Argument { name, default } => {
                // No separator means no default at all, which is
                // distinct from an empty default tree.
                self.emit(Node::Argument {
                    name: Wikitext::from_nodes(name),
                    default: default.map(Wikitext::from_nodes),
                });
                Ok(())
            }
            other => Err(Self::mismatch("argument close", &other)),
        }
    }

    fn close_wikilink(&mut self) -> Result<(), BuildError> {
        match self.pop("wikilink close")? {
            Frame::Wikilink { title, text } => {
                self.emit(Node::Wikilink {
                    title: Wikitext::from_nodes(title),
                    text: text.map(Wikitext::from_nodes),
                });
                Ok(())
            }
            other => Err(Self::mismatch("wikilink close", &other)),
        }
    }

    fn close_heading(&mut self) -> Result<(), BuildError> {
        match self.pop("heading close")? {
            Frame::Heading { level, title } => {
                self.emit(Node::Heading {
                    level,
                    title: Wikitext::from_nodes(title),
                });
                Ok(())
            }
            other => Err(Self::mismatch("heading close", &other)),
        }
    }

    fn close_comment(&mut self) -> Result<(), BuildError> {
        match self.pop("comment close")? {
            Frame::Comment { contents } => {
                self.emit(Node::Comment { contents });
                Ok(())
            }
            other => Err(Self::mismatch("comment close", &other)),
        }
    }

    fn close_entity(&mut self) -> Result<(), BuildError> {
        match self.pop("entity close")? {
            Frame::Entity { form, value } => {
                self.emit(Node::HtmlEntity { value, form });
                Ok(())
            }
            other => Err(Self::mismatch("entity close", &other)),
        }
    }

    fn pop(&mut self, found: &'static str) -> Result<Frame, BuildError> {
        let frame = self
            .stack
            .pop()
            .ok_or(BuildError::MismatchedClose { found })?;
        trace!(
            construct = frame.describe(),
            depth = self.stack.len(),
            "close"
        );
        Ok(frame)
    }

    fn mismatch(found: &'static str, open: &Frame) -> BuildError {
        trace!(found, open = open.describe(), "close marker mismatch");
        BuildError::MismatchedClose { found }
    }
}
