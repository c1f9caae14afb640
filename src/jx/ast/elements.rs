//! Node types of the jx tree
//!
//!     - [module]: source file, package/import declarations, module declaration
//!     - [markup]: the element-or-fragment sum type and fragments
//!     - [element]: elements, tag names and how an element was closed
//!     - [attribute]: named and spread attributes and their values
//!     - [child]: everything that can appear between an open and close tag

pub mod attribute;
pub mod child;
pub mod element;
pub mod markup;
pub mod module;

pub use attribute::{
    Attribute, AttributeName, AttributeNameKind, AttributeValue, NamedAttribute, StringValue,
};
pub use child::{
    Child, Comment, Doctype, EmbeddedExpression, Entity, ErroneousEndTag, ErrorNode, RawText, Text,
};
pub use element::{Closing, Element, TagName, TagNameKind};
pub use markup::{Fragment, Markup};
pub use module::{
    FormalParameter, ImportDeclaration, ModuleDeclaration, PackageDeclaration, SourceFile,
};
