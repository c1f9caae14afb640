//! Attributes
//!
//!     `name`, `name="text"`, `name='text'`, `name=bare`, `name={expr}`, `name=<el/>`,
//!     `name=<>...</>` and the nameless spread form `{...expr}`. An attribute whose host
//!     expression failed to parse is kept as an [ErrorNode] in the attribute list.

use super::child::{EmbeddedExpression, ErrorNode};
use super::markup::Markup;
use crate::jx::ast::range::Range;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeNameKind {
    Identifier(String),
    Namespaced { namespace: String, name: String },
}

impl fmt::Display for AttributeNameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeNameKind::Identifier(name) => f.write_str(name),
            AttributeNameKind::Namespaced { namespace, name } => {
                write!(f, "{}:{}", namespace, name)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeName {
    pub kind: AttributeNameKind,
    pub location: Range,
}

impl AttributeName {
    pub fn text(&self) -> String {
        self.kind.to_string()
    }
}

/// A string attribute value. `quote` is `None` for unquoted HTML-style values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StringValue {
    pub value: String,
    pub quote: Option<char>,
    pub location: Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeValue {
    String(StringValue),
    Expression(EmbeddedExpression),
    Markup(Box<Markup>),
}

impl AttributeValue {
    pub fn location(&self) -> &Range {
        match self {
            AttributeValue::String(value) => &value.location,
            AttributeValue::Expression(expr) => &expr.location,
            AttributeValue::Markup(markup) => markup.location(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(value) => Some(&value.value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedAttribute {
    pub name: AttributeName,
    /// `None` for boolean-style attributes
    pub value: Option<AttributeValue>,
    pub location: Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Attribute {
    Named(NamedAttribute),
    Spread(EmbeddedExpression),
    Error(ErrorNode),
}

impl Attribute {
    pub fn location(&self) -> &Range {
        match self {
            Attribute::Named(named) => &named.location,
            Attribute::Spread(spread) => &spread.location,
            Attribute::Error(error) => &error.location,
        }
    }
}
