//! Scanner tokens
//!
//!     [Token] is what the scanner hands to the grammar layer: a flat, already tag-matched
//!     stream in which every element is closed by an [Token::EndTag], an
//!     [Token::ImplicitEndTag] or a [Token::SelfClosingMarker]. Host expressions arrive
//!     pre-parsed inside [Token::Expression] and [Token::Spread].
//!
//!     Two logos lexers classify the raw input, one per scanner context: [ContentToken]
//!     between tags and [TagToken] inside a start or end tag. Neither runs over the whole
//!     document; the scanner applies them at its cursor with [lex_at] and decides what the
//!     lexeme means from its own state.

use crate::jx::ast::elements::{AttributeNameKind, TagNameKind};
use crate::jx::host::Expression;
use logos::Logos;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// `<` of a start tag
    TagOpen,
    TagName(TagNameKind),
    /// `>` ending a start tag
    TagEnd,
    /// `/>`
    SelfClosingMarker,
    /// `</name>` closing the top frame
    EndTag(TagNameKind),
    /// Synthesized close of a frame; zero width, at the end tag that caused it
    ImplicitEndTag(String),
    /// `</name>` that matched no open frame
    ErroneousEndTag(String),
    /// `<>`
    FragmentOpen,
    /// `</>`
    FragmentClose,
    AttributeName(AttributeNameKind),
    Equals,
    StringValue { value: String, quote: Option<char> },
    /// `{expr}`
    Expression(Expression),
    /// `{...expr}`
    Spread(Expression),
    /// A construct that could not be parsed; the message explains why
    Error(String),
    Text(String),
    Entity(String),
    RawText(String),
    Comment(String),
    Doctype(String),
}

/// Lexemes between tags
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentToken {
    #[token("<!--")]
    CommentStart,
    #[regex(r"<![Dd][Oo][Cc][Tt][Yy][Pp][Ee][^>]*>")]
    Doctype,
    #[token("</>")]
    FragmentClose,
    #[token("</")]
    EndTagOpen,
    #[token("<>")]
    FragmentOpen,
    #[token("<")]
    TagOpen,
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,
    #[token(">")]
    Greater,
    // Length limits are checked by the scanner
    #[regex(r"&(#([xX][0-9a-fA-F]+|[0-9]+)|[A-Za-z]+);?")]
    Entity,
    #[token("&")]
    Ampersand,
    #[regex(r"[^{}<>&]+")]
    Text,
}

/// Lexemes inside a start or end tag
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TagToken {
    #[token("/>")]
    SelfClose,
    #[token(">")]
    Close,
    #[token("=")]
    Equals,
    #[token("{")]
    BraceOpen,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("\"")]
    DoubleQuote,
    #[token("'")]
    SingleQuote,
    #[token("<")]
    Less,
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$-]*")]
    Name,
}

/// Lex one token of `T` starting at `offset`; the span is absolute
///
/// `None` at end of input. A `None` token means the lexer rejected the input there.
pub fn lex_at<'s, T>(source: &'s str, offset: usize) -> Option<(Option<T>, Range<usize>)>
where
    T: Logos<'s, Source = str>,
    T::Extras: Default,
{
    let rest = source.get(offset..)?;
    let mut lexer = T::lexer(rest);
    let token = lexer.next()?;
    let span = lexer.span();
    Some((token.ok(), (offset + span.start)..(offset + span.end)))
}

/// Whether `text` is exactly one [TagToken::Name]
pub fn is_tag_name(text: &str) -> bool {
    matches!(
        lex_at::<TagToken>(text, 0),
        Some((Some(TagToken::Name), span)) if span == (0..text.len())
    )
}

/// Whether an entity lexeme stays within the HTML limits
///
/// Named entities have at most 30 letters, decimal ones 5 digits, hexadecimal ones 6.
pub fn entity_is_well_formed(raw: &str) -> bool {
    let body = raw.trim_start_matches('&').trim_end_matches(';');
    match body.strip_prefix('#') {
        Some(number) => match number.strip_prefix(|c| c == 'x' || c == 'X') {
            Some(hex) => (1..=6).contains(&hex.len()),
            None => (1..=5).contains(&number.len()),
        },
        None => (1..=30).contains(&body.len()),
    }
}
