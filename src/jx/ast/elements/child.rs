//! Children of elements and fragments

use super::element::Element;
use super::markup::{Fragment, Markup};
use crate::jx::ast::range::Range;
use crate::jx::host::Expression;

/// A maximal run of character data (no `{ } < >`), entities excluded
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Text {
    pub text: String,
    pub location: Range,
}

/// `&amp;`, `&#169;`, `&#xA9;`, kept as written
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entity {
    pub raw: String,
    pub location: Range,
}

/// Verbatim body of a raw-text element such as `script`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawText {
    pub text: String,
    pub location: Range,
}

/// `<!-- ... -->`; `text` excludes the delimiters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Comment {
    pub text: String,
    pub location: Range,
}

/// `<!doctype ...>`; `text` is what follows the keyword
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Doctype {
    pub text: String,
    pub location: Range,
}

/// An end tag that matched no open element
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErroneousEndTag {
    pub name: String,
    pub location: Range,
}

/// A host expression between `{` and `}`; the location covers the braces
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmbeddedExpression {
    pub expression: Expression,
    pub location: Range,
}

/// A construct that could not be built; `source` is the text it covered
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorNode {
    pub message: String,
    pub source: String,
    pub location: Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Child {
    Text(Text),
    Entity(Entity),
    Element(Element),
    Fragment(Fragment),
    Expression(EmbeddedExpression),
    Spread(EmbeddedExpression),
    RawText(RawText),
    Comment(Comment),
    Doctype(Doctype),
    ErroneousEndTag(ErroneousEndTag),
    Error(ErrorNode),
}

impl Child {
    pub fn location(&self) -> &Range {
        match self {
            Child::Text(text) => &text.location,
            Child::Entity(entity) => &entity.location,
            Child::Element(element) => &element.location,
            Child::Fragment(fragment) => &fragment.location,
            Child::Expression(expr) | Child::Spread(expr) => &expr.location,
            Child::RawText(raw) => &raw.location,
            Child::Comment(comment) => &comment.location,
            Child::Doctype(doctype) => &doctype.location,
            Child::ErroneousEndTag(tag) => &tag.location,
            Child::Error(error) => &error.location,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Child::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Child::Text(text) => Some(&text.text),
            _ => None,
        }
    }
}

impl From<Markup> for Child {
    fn from(markup: Markup) -> Self {
        match markup {
            Markup::Element(element) => Child::Element(element),
            Markup::Fragment(fragment) => Child::Fragment(fragment),
        }
    }
}
