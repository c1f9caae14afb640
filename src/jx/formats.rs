//! Output formats for parsed jx sources
//!
//! - [treeviz]: one line per node, for eyeballing a tree in a terminal
//! - [json] and [yaml]: the serde rendition of the [AstSnapshot](crate::jx::ast::AstSnapshot)
//! - [source]: the canonical pretty printer; its output parses back to a structurally equal tree
//!
//! Formats are looked up by name through the [FormatRegistry].

pub mod json;
pub mod registry;
pub mod source;
pub mod treeviz;
pub mod yaml;

pub use json::JsonFormatter;
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use source::{markup_to_source, to_source, SourceFormatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
pub use yaml::YamlFormatter;
