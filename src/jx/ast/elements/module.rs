//! Source files and module declarations
//!
//!     package ui.widgets;
//!     import ui.Theme;
//!     Card(String title, List<String> items) { <div>...</div> }
//!
//!     The package declaration is optional, imports may repeat, and exactly one module
//!     declaration follows. The module body is a single markup value.

use super::markup::Markup;
use crate::jx::ast::range::Range;
use crate::jx::host::TypeRef;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageDeclaration {
    /// Dotted name, e.g. `ui.widgets`
    pub name: String,
    pub location: Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportDeclaration {
    /// Dotted path without the trailing `.*`
    pub path: String,
    pub is_static: bool,
    pub wildcard: bool,
    pub location: Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FormalParameter {
    pub is_final: bool,
    pub ty: TypeRef,
    pub name: String,
    pub location: Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleDeclaration {
    pub name: String,
    pub parameters: Vec<FormalParameter>,
    pub body: Markup,
    pub location: Range,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceFile {
    pub package: Option<PackageDeclaration>,
    pub imports: Vec<ImportDeclaration>,
    pub module: ModuleDeclaration,
    pub location: Range,
}
