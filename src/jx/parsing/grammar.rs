//! Markup productions
//!
//! chumsky combinators over the scanner's `(Token, byte span)` pairs. Tag matching has
//! already happened in the scanner, so the grammar only has to assemble the tree: one generic
//! element production parameterized by whatever tag name the scanner saw, one shared
//! attribute production and one children production. Markup recurses through attribute
//! values and children.
//!
//! Byte spans are converted to [Range]s through the document's [SourceLocation].

use chumsky::prelude::*;
use std::ops::Range as ByteRange;

use crate::jx::ast::elements::{
    Attribute, AttributeName, AttributeValue, Child, Closing, Comment, Doctype, Element,
    EmbeddedExpression, Entity, ErroneousEndTag, ErrorNode, Fragment, Markup, NamedAttribute,
    RawText, StringValue, TagName, Text,
};
use crate::jx::ast::error::ParseError;
use crate::jx::ast::range::{Range, SourceLocation};
use crate::jx::scanning::Token;

/// Type alias for token with location
pub(crate) type TokenLocation = (Token, ByteRange<usize>);

/// Type alias for parser error
pub(crate) type ParserError = Simple<TokenLocation>;

/// What the productions need to build located nodes
#[derive(Clone, Copy)]
pub(crate) struct GrammarContext<'a> {
    pub source: &'a str,
    pub locator: &'a SourceLocation,
}

impl<'a> GrammarContext<'a> {
    fn range(&self, span: ByteRange<usize>) -> Range {
        self.locator.range(span)
    }
}

/// Match one token and map it, or fail with the token as found
fn select<'a, O>(
    f: impl Fn(&Token, &ByteRange<usize>) -> Option<O> + Clone + 'a,
) -> impl Parser<TokenLocation, O, Error = ParserError> + Clone + 'a {
    filter_map(move |span, item: TokenLocation| match f(&item.0, &item.1) {
        Some(out) => Ok(out),
        None => Err(Simple::expected_input_found(span, Vec::new(), Some(item))),
    })
}

/// Match a specific token, yielding its byte span
fn token<'a>(t: Token) -> impl Parser<TokenLocation, ByteRange<usize>, Error = ParserError> + Clone + 'a {
    select(move |tok, span| (tok == &t).then(|| span.clone()))
}

fn embedded<'a>(
    cx: GrammarContext<'a>,
    spread: bool,
) -> impl Parser<TokenLocation, EmbeddedExpression, Error = ParserError> + Clone + 'a {
    select(move |tok, span| {
        let expression = match tok {
            Token::Expression(expression) if !spread => expression,
            Token::Spread(expression) if spread => expression,
            _ => return None,
        };
        Some(EmbeddedExpression {
            expression: expression.clone(),
            location: cx.range(span.clone()),
        })
    })
}

fn error_node<'a>(
    cx: GrammarContext<'a>,
) -> impl Parser<TokenLocation, ErrorNode, Error = ParserError> + Clone + 'a {
    select(move |tok, span| match tok {
        Token::Error(message) => Some(ErrorNode {
            message: message.clone(),
            source: cx.source.get(span.clone()).unwrap_or("").to_string(),
            location: cx.range(span.clone()),
        }),
        _ => None,
    })
}

fn attribute_name<'a>(
    cx: GrammarContext<'a>,
) -> impl Parser<TokenLocation, AttributeName, Error = ParserError> + Clone + 'a {
    select(move |tok, span| match tok {
        Token::AttributeName(kind) => Some(AttributeName {
            kind: kind.clone(),
            location: cx.range(span.clone()),
        }),
        _ => None,
    })
}

fn string_value<'a>(
    cx: GrammarContext<'a>,
) -> impl Parser<TokenLocation, StringValue, Error = ParserError> + Clone + 'a {
    select(move |tok, span| match tok {
        Token::StringValue { value, quote } => Some(StringValue {
            value: value.clone(),
            quote: *quote,
            location: cx.range(span.clone()),
        }),
        _ => None,
    })
}

/// Leaf children: character data, entities, raw text, comments, doctypes, stray end tags
fn leaf_child<'a>(
    cx: GrammarContext<'a>,
) -> impl Parser<TokenLocation, Child, Error = ParserError> + Clone + 'a {
    select(move |tok, span| {
        let location = cx.range(span.clone());
        let child = match tok {
            Token::Text(text) => Child::Text(Text {
                text: text.clone(),
                location,
            }),
            Token::Entity(raw) => Child::Entity(Entity {
                raw: raw.clone(),
                location,
            }),
            Token::RawText(text) => Child::RawText(RawText {
                text: text.clone(),
                location,
            }),
            Token::Comment(text) => Child::Comment(Comment {
                text: text.clone(),
                location,
            }),
            Token::Doctype(text) => Child::Doctype(Doctype {
                text: text.clone(),
                location,
            }),
            Token::ErroneousEndTag(name) => Child::ErroneousEndTag(ErroneousEndTag {
                name: name.clone(),
                location,
            }),
            _ => return None,
        };
        Some(child)
    })
}

/// How an element with a body ends, and where
fn closing<'a>(
    cx: GrammarContext<'a>,
) -> impl Parser<TokenLocation, (Closing, ByteRange<usize>), Error = ParserError> + Clone + 'a {
    select(move |tok, span| match tok {
        Token::EndTag(kind) => Some((
            Closing::Explicit(TagName::new(kind.clone(), cx.range(span.clone()))),
            span.clone(),
        )),
        Token::ImplicitEndTag(_) => Some((Closing::Implicit, span.clone())),
        _ => None,
    })
}

/// The markup production: an element or a fragment
pub(crate) fn markup<'a>(
    cx: GrammarContext<'a>,
) -> impl Parser<TokenLocation, Markup, Error = ParserError> + Clone + 'a {
    recursive(move |markup| {
        let attribute_value = string_value(cx)
            .map(AttributeValue::String)
            .or(embedded(cx, false).map(AttributeValue::Expression))
            .or(markup
                .clone()
                .map(|value| AttributeValue::Markup(Box::new(value))));

        let named_attribute = attribute_name(cx)
            .then(token(Token::Equals).ignore_then(attribute_value).or_not())
            .map(|(name, value): (AttributeName, Option<AttributeValue>)| {
                let location = match &value {
                    Some(value) => name.location.cover(value.location()),
                    None => name.location.clone(),
                };
                NamedAttribute {
                    name,
                    value,
                    location,
                }
            });

        // `name=` whose value failed; the error node covers the name as well
        let broken_attribute = attribute_name(cx)
            .then_ignore(token(Token::Equals))
            .then(error_node(cx))
            .map(move |(name, error): (AttributeName, ErrorNode)| {
                let location = name.location.cover(&error.location);
                ErrorNode {
                    message: error.message,
                    source: location.text(cx.source).to_string(),
                    location,
                }
            });

        let attribute = broken_attribute
            .map(Attribute::Error)
            .or(named_attribute.map(Attribute::Named))
            .or(embedded(cx, true).map(Attribute::Spread))
            .or(error_node(cx).map(Attribute::Error));

        let child = leaf_child(cx)
            .or(markup.clone().map(Child::from))
            .or(embedded(cx, false).map(Child::Expression))
            .or(embedded(cx, true).map(Child::Spread))
            .or(error_node(cx).map(Child::Error));

        let tag_name = select(move |tok, span| match tok {
            Token::TagName(kind) => Some(TagName::new(kind.clone(), cx.range(span.clone()))),
            _ => None,
        });

        let body = token(Token::SelfClosingMarker)
            .map(|span| (Vec::new(), Closing::SelfClosing, span))
            .or(token(Token::TagEnd)
                .ignore_then(child.clone().repeated())
                .then(closing(cx))
                .map(|(children, (closing, span))| (children, closing, span)));

        let element = token(Token::TagOpen)
            .then(tag_name)
            .then(attribute.repeated())
            .then(body)
            .map(
                move |(((open, name), attributes), (children, closing, close))| Element {
                    name,
                    attributes,
                    children,
                    closing,
                    location: cx.range(open.start..close.end),
                },
            );

        let fragment = token(Token::FragmentOpen)
            .then(child.repeated())
            .then(token(Token::FragmentClose))
            .map(move |((open, children), close)| Fragment {
                children,
                location: cx.range(open.start..close.end),
            });

        element
            .map(Markup::Element)
            .or(fragment.map(Markup::Fragment))
    })
}

/// Build the tree for one scanned markup value
pub(crate) fn parse_markup_tokens(
    cx: GrammarContext<'_>,
    tokens: Vec<TokenLocation>,
) -> Result<Markup, ParseError> {
    let eoi = tokens.last().map(|(_, span)| span.end).unwrap_or(0);
    markup(cx)
        .then_ignore(end())
        .parse(tokens)
        .map_err(|errors| syntax_error(cx, &errors, eoi))
}

fn syntax_error(cx: GrammarContext<'_>, errors: &[ParserError], eoi: usize) -> ParseError {
    match errors.first().and_then(|err| err.found()) {
        Some((token, span)) => ParseError::Syntax {
            message: format!("unexpected {:?}", token),
            location: cx.range(span.clone()),
        },
        None => ParseError::Syntax {
            message: "unexpected end of markup".to_string(),
            location: cx.range(eoi..eoi),
        },
    }
}
