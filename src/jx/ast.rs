//! Tree model for jx sources
//!
//!     The parser produces a typed concrete syntax tree. A [SourceFile] holds the package and
//!     import declarations and the single [ModuleDeclaration], whose body is one [Markup]
//!     value: either an [Element] or a [Fragment]. Elements and fragments own ordered
//!     [Child] lists; elements also own ordered [Attribute] lists.
//!
//!     The tree is a set of sum types rather than a node hierarchy: consumers pattern match on
//!     [Child], [Attribute] and [Markup], or implement [Visitor] and let
//!     [SourceFile::accept] drive the walk.
//!
//! Locations
//!
//!     Every node carries a [Range]. Scanner tokens carry byte spans only; the grammar layer
//!     converts them through a [SourceLocation] built once per document. Spans always point
//!     into the original source, including for markup nested inside host expressions.
//!
//! Normalized views
//!
//!     [AstSnapshot] is the location-free rendition of a tree. Two trees are structurally
//!     equal when their snapshots are equal; formatters render snapshots rather than walking
//!     the tree themselves.

pub mod diagnostics;
pub mod elements;
pub mod error;
pub mod range;
pub mod snapshot;
pub mod traits;

pub use diagnostics::{Diagnostic, DiagnosticSeverity};
pub use elements::{
    Attribute, AttributeName, AttributeNameKind, AttributeValue, Child, Closing, Comment,
    Doctype, Element, EmbeddedExpression, Entity, ErroneousEndTag, ErrorNode, FormalParameter,
    Fragment, ImportDeclaration, Markup, ModuleDeclaration, NamedAttribute, PackageDeclaration,
    RawText, SourceFile, StringValue, TagName, TagNameKind, Text,
};
pub use error::{format_source_context, ParseError};
pub use range::{Position, Range, SourceLocation};
pub use snapshot::{snapshot_from_markup, snapshot_from_source_file, AstSnapshot};
pub use traits::{AstNode, Visitor};
