//! Markup values: an element or a fragment
//!
//!     A fragment is written `<>` children `</>`. It has no name and is never closed
//!     implicitly: a missing `</>` is a fatal error.

use super::child::Child;
use super::element::Element;
use crate::jx::ast::range::Range;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fragment {
    pub children: Vec<Child>,
    pub location: Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Markup {
    Element(Element),
    Fragment(Fragment),
}

impl Markup {
    pub fn location(&self) -> &Range {
        match self {
            Markup::Element(element) => &element.location,
            Markup::Fragment(fragment) => &fragment.location,
        }
    }

    pub fn children(&self) -> &[Child] {
        match self {
            Markup::Element(element) => &element.children,
            Markup::Fragment(fragment) => &fragment.children,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Markup::Element(element) => Some(element),
            Markup::Fragment(_) => None,
        }
    }

    pub fn as_fragment(&self) -> Option<&Fragment> {
        match self {
            Markup::Fragment(fragment) => Some(fragment),
            Markup::Element(_) => None,
        }
    }
}
