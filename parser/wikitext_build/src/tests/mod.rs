//! Builder tests.
//!
//! Fixtures follow the reference behavior of the source system's
//! builder: token streams are hand-assembled exactly as the external
//! lexer would emit them, and the resulting trees are compared deeply.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use wikitext_ir::{
    EntityForm, HeadingLevel, Node, Parameter, Token, TokenList, Wikitext,
};

use crate::{build, BuildError};

fn wrap(nodes: Vec<Node>) -> Wikitext {
    Wikitext::from_nodes(nodes)
}

fn text(value: &str) -> Token {
    Token::Text(value.to_owned())
}

fn built(tokens: Vec<Token>) -> Wikitext {
    build(TokenList::from_vec(tokens)).unwrap()
}

#[test]
fn test_empty_stream_builds_empty_tree() {
    let tree = built(vec![]);
    assert_eq!(tree.len(), Ok(0));
}

#[test]
fn test_text() {
    assert_eq!(built(vec![text("foobar")]), wrap(vec![Node::text("foobar")]));
    assert_eq!(built(vec![text("fóóbar")]), wrap(vec![Node::text("fóóbar")]));
    assert_eq!(
        built(vec![text("spam"), text("eggs")]),
        wrap(vec![Node::text("spam"), Node::text("eggs")])
    );
}

#[test]
fn test_template_name_only() {
    assert_eq!(
        built(vec![Token::TemplateOpen, text("foobar"), Token::TemplateClose]),
        wrap(vec![Node::Template {
            name: Wikitext::from_text("foobar"),
            params: vec![],
        }])
    );
    // Adjacent text runs stay separate nodes inside the name tree.
    assert_eq!(
        built(vec![
            Token::TemplateOpen,
            text("spam"),
            text("eggs"),
            Token::TemplateClose,
        ]),
        wrap(vec![Node::Template {
            name: wrap(vec![Node::text("spam"), Node::text("eggs")]),
            params: vec![],
        }])
    );
}

#[test]
fn test_template_positional_param() {
    assert_eq!(
        built(vec![
            Token::TemplateOpen,
            text("foo"),
            Token::TemplateParamSeparator,
            text("bar"),
            Token::TemplateClose,
        ]),
        wrap(vec![Node::Template {
            name: Wikitext::from_text("foo"),
            params: vec![Parameter::new(
                Wikitext::from_text("1"),
                Wikitext::from_text("bar"),
                false,
            )],
        }])
    );
}

#[test]
fn test_template_keyed_param() {
    assert_eq!(
        built(vec![
            Token::TemplateOpen,
            text("foo"),
            Token::TemplateParamSeparator,
            text("bar"),
            Token::TemplateParamEquals,
            text("baz"),
            Token::TemplateClose,
        ]),
        wrap(vec![Node::Template {
            name: Wikitext::from_text("foo"),
            params: vec![Parameter::new(
                Wikitext::from_text("bar"),
                Wikitext::from_text("baz"),
                true,
            )],
        }])
    );
}

/// The positional counter counts only keyless parameters, in appearance
/// order; explicit keys never consume a numeral. The explicit "3" and
/// the computed positional "3" collide and both survive.
#[test]
fn test_template_mixed_keys() {
    let tree = built(vec![
        Token::TemplateOpen,
        text("foo"),
        Token::TemplateParamSeparator,
        text("bar"),
        Token::TemplateParamEquals,
        text("baz"),
        Token::TemplateParamSeparator,
        text("biz"),
        Token::TemplateParamSeparator,
        text("buzz"),
        Token::TemplateParamSeparator,
        text("3"),
        Token::TemplateParamEquals,
        text("buff"),
        Token::TemplateParamSeparator,
        text("baff"),
        Token::TemplateClose,
    ]);
    assert_eq!(
        tree,
        wrap(vec![Node::Template {
            name: Wikitext::from_text("foo"),
            params: vec![
                Parameter::new(
                    Wikitext::from_text("bar"),
                    Wikitext::from_text("baz"),
                    true,
                ),
                Parameter::new(Wikitext::from_text("1"), Wikitext::from_text("biz"), false),
                Parameter::new(
                    Wikitext::from_text("2"),
                    Wikitext::from_text("buzz"),
                    false,
                ),
                Parameter::new(
                    Wikitext::from_text("3"),
                    Wikitext::from_text("buff"),
                    true,
                ),
                Parameter::new(
                    Wikitext::from_text("3"),
                    Wikitext::from_text("baff"),
                    false,
                ),
            ],
        }])
    );
}

#[test]
fn test_argument_without_default() {
    assert_eq!(
        built(vec![Token::ArgumentOpen, text("foobar"), Token::ArgumentClose]),
        wrap(vec![Node::Argument {
            name: Wikitext::from_text("foobar"),
            default: None,
        }])
    );
    assert_eq!(
        built(vec![
            Token::ArgumentOpen,
            text("spam"),
            text("eggs"),
            Token::ArgumentClose,
        ]),
        wrap(vec![Node::Argument {
            name: wrap(vec![Node::text("spam"), Node::text("eggs")]),
            default: None,
        }])
    );
}

#[test]
fn test_argument_with_default() {
    assert_eq!(
        built(vec![
            Token::ArgumentOpen,
            text("foo"),
            Token::ArgumentSeparator,
            text("bar"),
            Token::ArgumentClose,
        ]),
        wrap(vec![Node::Argument {
            name: Wikitext::from_text("foo"),
            default: Some(Wikitext::from_text("bar")),
        }])
    );
    assert_eq!(
        built(vec![
            Token::ArgumentOpen,
            text("foo"),
            text("bar"),
            Token::ArgumentSeparator,
            text("baz"),
            text("biz"),
            Token::ArgumentClose,
        ]),
        wrap(vec![Node::Argument {
            name: wrap(vec![Node::text("foo"), Node::text("bar")]),
            default: Some(wrap(vec![Node::text("baz"), Node::text("biz")])),
        }])
    );
}

/// A separator with empty content yields an empty default tree, which
/// is distinct from no default at all.
#[test]
fn test_argument_empty_default_is_not_absent() {
    let tree = built(vec![
        Token::ArgumentOpen,
        text("foo"),
        Token::ArgumentSeparator,
        Token::ArgumentClose,
    ]);
    assert_eq!(
        tree,
        wrap(vec![Node::Argument {
            name: Wikitext::from_text("foo"),
            default: Some(Wikitext::new()),
        }])
    );
}

#[test]
fn test_wikilink() {
    assert_eq!(
        built(vec![Token::WikilinkOpen, text("foobar"), Token::WikilinkClose]),
        wrap(vec![Node::Wikilink {
            title: Wikitext::from_text("foobar"),
            text: None,
        }])
    );
    assert_eq!(
        built(vec![
            Token::WikilinkOpen,
            text("foo"),
            Token::WikilinkSeparator,
            text("bar"),
            Token::WikilinkClose,
        ]),
        wrap(vec![Node::Wikilink {
            title: Wikitext::from_text("foo"),
            text: Some(Wikitext::from_text("bar")),
        }])
    );
}

#[test]
fn test_html_entity() {
    let cases = [
        ("nbsp", EntityForm::Named),
        ("107", EntityForm::Decimal),
        ("6b", EntityForm::Hex),
    ];
    for (value, form) in cases {
        assert_eq!(
            built(vec![
                Token::HtmlEntityOpen { form },
                text(value),
                Token::HtmlEntityClose,
            ]),
            wrap(vec![Node::HtmlEntity {
                value: value.to_owned(),
                form,
            }])
        );
    }
}

#[test]
fn test_heading() {
    for depth in [1u8, 6] {
        let level = HeadingLevel::new(depth).unwrap();
        assert_eq!(
            built(vec![
                Token::HeadingOpen { level },
                text("foobar"),
                Token::HeadingClose,
            ]),
            wrap(vec![Node::Heading {
                level,
                title: Wikitext::from_text("foobar"),
            }])
        );
    }
}

#[test]
fn test_comment() {
    assert_eq!(
        built(vec![
            Token::CommentOpen,
            text("comment"),
            Token::CommentClose,
        ]),
        wrap(vec![Node::Comment {
            contents: "comment".to_owned(),
        }])
    );
}

#[test]
fn test_nested_template_in_param_value() {
    let tree = built(vec![
        Token::TemplateOpen,
        text("foo"),
        Token::TemplateParamSeparator,
        text("bar"),
        Token::TemplateParamEquals,
        Token::TemplateOpen,
        text("baz"),
        Token::TemplateClose,
        Token::TemplateClose,
    ]);
    assert_eq!(
        tree,
        wrap(vec![Node::Template {
            name: Wikitext::from_text("foo"),
            params: vec![Parameter::new(
                Wikitext::from_text("bar"),
                wrap(vec![Node::Template {
                    name: Wikitext::from_text("baz"),
                    params: vec![],
                }]),
                true,
            )],
        }])
    );
}

#[test]
fn test_nested_argument_in_default() {
    let tree = built(vec![
        Token::ArgumentOpen,
        text("foo"),
        Token::ArgumentSeparator,
        Token::ArgumentOpen,
        text("bar"),
        Token::ArgumentClose,
        Token::ArgumentClose,
    ]);
    assert_eq!(
        tree,
        wrap(vec![Node::Argument {
            name: Wikitext::from_text("foo"),
            default: Some(wrap(vec![Node::Argument {
                name: Wikitext::from_text("bar"),
                default: None,
            }])),
        }])
    );
}

/// Identical input builds deep-equal trees over independent storage.
#[test]
fn test_double_build_is_storage_independent() {
    let tokens = vec![
        Token::TemplateOpen,
        text("foo"),
        Token::TemplateParamSeparator,
        text("bar"),
        Token::TemplateClose,
    ];
    let first = built(tokens.clone());
    let second = built(tokens);
    assert_eq!(first, second);

    first.append(Node::text("extra")).unwrap();
    assert_ne!(first, second);
    assert_eq!(second.len(), Ok(1));
}

#[test]
fn test_unclosed_construct_is_fatal() {
    let result = build(TokenList::from_vec(vec![Token::TemplateOpen, text("foo")]));
    assert_eq!(result, Err(BuildError::UnclosedConstructs(1)));

    let result = build(TokenList::from_vec(vec![
        Token::TemplateOpen,
        Token::WikilinkOpen,
    ]));
    assert_eq!(result, Err(BuildError::UnclosedConstructs(2)));
}

#[test]
fn test_close_without_open_is_fatal() {
    let result = build(TokenList::from_vec(vec![Token::TemplateClose]));
    assert_eq!(
        result,
        Err(BuildError::MismatchedClose {
            found: "template close"
        })
    );
}

#[test]
fn test_close_of_wrong_construct_is_fatal() {
    let result = build(TokenList::from_vec(vec![
        Token::TemplateOpen,
        text("foo"),
        Token::ArgumentClose,
    ]));
    assert_eq!(
        result,
        Err(BuildError::MismatchedClose {
            found: "argument close"
        })
    );
}

#[test]
fn test_stray_separators_and_equals_are_fatal() {
    let stray = [
        Token::TemplateParamSeparator,
        Token::TemplateParamEquals,
        Token::ArgumentSeparator,
        Token::WikilinkSeparator,
    ];
    for token in stray {
        let result = build(TokenList::from_vec(vec![token.clone()]));
        assert_eq!(result, Err(BuildError::StrayMarker(token.describe())));
    }

    // Equals in a template name slot (no separator seen yet).
    let result = build(TokenList::from_vec(vec![
        Token::TemplateOpen,
        text("foo"),
        Token::TemplateParamEquals,
    ]));
    assert_eq!(
        result,
        Err(BuildError::StrayMarker("template parameter equals"))
    );

    // A second argument separator.
    let result = build(TokenList::from_vec(vec![
        Token::ArgumentOpen,
        text("foo"),
        Token::ArgumentSeparator,
        text("bar"),
        Token::ArgumentSeparator,
    ]));
    assert_eq!(result, Err(BuildError::StrayMarker("argument separator")));
}

#[test]
fn test_marker_inside_comment_is_fatal() {
    let result = build(TokenList::from_vec(vec![
        Token::CommentOpen,
        Token::TemplateOpen,
    ]));
    assert_eq!(
        result,
        Err(BuildError::MarkerInTextInterior("template open"))
    );
}

#[test]
fn test_marker_inside_entity_is_fatal() {
    let result = build(TokenList::from_vec(vec![
        Token::HtmlEntityOpen {
            form: EntityForm::Named,
        },
        Token::CommentOpen,
    ]));
    assert_eq!(result, Err(BuildError::MarkerInTextInterior("comment open")));
}

#[test]
fn test_tag_markers_are_rejected() {
    for token in [Token::TagOpen, Token::TagClose] {
        let result = build(TokenList::from_vec(vec![token]));
        assert_eq!(result, Err(BuildError::UnsupportedTag));
    }
}

proptest! {
    /// A stream of k text tokens builds k text nodes, in order, with
    /// exact content.
    #[test]
    fn prop_text_tokens_build_one_to_one(
        values in prop::collection::vec("[a-zóé ]{0,8}", 0..24),
    ) {
        let tokens: Vec<Token> = values.iter().map(|v| text(v)).collect();
        let tree = build(TokenList::from_vec(tokens)).unwrap();

        prop_assert_eq!(tree.len(), Ok(values.len()));
        let nodes = tree.to_vec().unwrap();
        for (node, value) in nodes.iter().zip(&values) {
            prop_assert_eq!(node, &Node::text(value.clone()));
        }
    }
}
