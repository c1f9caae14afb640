//! Elements and tag names
//!
//!     An element is written either self-closing (`<br/>`) or as an opening tag, children and a
//!     closing boundary. The closing boundary is recorded in [Closing]: an explicit end tag, an
//!     implicit end synthesized by the scanner (auto-close recovery and void elements), or the
//!     self-closing marker.
//!
//!     Tag names come in three purely syntactic forms: `div`, `svg:rect` and `Ui.Button`.
//!     Nothing here resolves what a name refers to.

use super::attribute::{Attribute, NamedAttribute};
use super::child::Child;
use crate::jx::ast::range::Range;
use crate::jx::scanning::tags;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagNameKind {
    Identifier(String),
    Namespaced { namespace: String, name: String },
    Member(Vec<String>),
}

impl TagNameKind {
    pub fn identifier(name: impl Into<String>) -> Self {
        TagNameKind::Identifier(name.into())
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self, TagNameKind::Identifier(_))
    }
}

impl fmt::Display for TagNameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagNameKind::Identifier(name) => f.write_str(name),
            TagNameKind::Namespaced { namespace, name } => write!(f, "{}:{}", namespace, name),
            TagNameKind::Member(path) => f.write_str(&path.join(".")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagName {
    pub kind: TagNameKind,
    pub location: Range,
}

impl TagName {
    pub fn new(kind: TagNameKind, location: Range) -> Self {
        Self { kind, location }
    }

    /// The name as written, e.g. `svg:rect`
    pub fn text(&self) -> String {
        self.kind.to_string()
    }
}

/// How an element's extent ended
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Closing {
    /// `<name ... />`
    SelfClosing,
    /// `</name>` present in the source
    Explicit(TagName),
    /// Closed by the scanner: a void element, or an element auto-closed by an outer end tag
    Implicit,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Element {
    pub name: TagName,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Child>,
    pub closing: Closing,
    pub location: Range,
}

impl Element {
    pub fn is_self_closing(&self) -> bool {
        matches!(self.closing, Closing::SelfClosing)
    }

    /// Void elements (`br`, `img`, ...) never have a body or an end tag
    pub fn is_void(&self) -> bool {
        tags::is_void(&self.name.kind)
    }

    /// Raw-text elements (`script`, `style`) hold their body verbatim
    pub fn is_raw_text(&self) -> bool {
        tags::is_raw_text(&self.name.kind)
    }

    /// First named attribute whose name is written `name`
    pub fn attribute(&self, name: &str) -> Option<&NamedAttribute> {
        self.attributes.iter().find_map(|attr| match attr {
            Attribute::Named(named) if named.name.text() == name => Some(named),
            _ => None,
        })
    }

    /// Direct children that are elements
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Child::Element(element) => Some(element),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_name_display() {
        assert_eq!(TagNameKind::identifier("div").to_string(), "div");
        let ns = TagNameKind::Namespaced {
            namespace: "svg".into(),
            name: "rect".into(),
        };
        assert_eq!(ns.to_string(), "svg:rect");
        let member = TagNameKind::Member(vec!["Ui".into(), "Button".into()]);
        assert_eq!(member.to_string(), "Ui.Button");
        assert!(!member.is_identifier());
    }

    #[test]
    fn test_void_classification_ignores_case() {
        let element = Element {
            name: TagName::new(TagNameKind::identifier("BR"), Range::default()),
            attributes: vec![],
            children: vec![],
            closing: Closing::Implicit,
            location: Range::default(),
        };
        assert!(element.is_void());
        assert!(!element.is_self_closing());
        assert!(!element.is_raw_text());
    }
}
