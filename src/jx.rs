//! Main module for jx library functionality
//!
//! Parsing runs scan-then-parse per markup value: [scanning] matches tags with an explicit
//! stack and recovers from malformed nesting, [parsing] assembles the token stream into the
//! [ast] and handles the module header, [host] parses embedded Java expressions, and
//! [ambiguity] is the table both sides consult where one input admits two readings.

pub mod ambiguity;
pub mod ast;
pub mod config;
pub mod formats;
pub mod host;
pub mod parsing;
pub mod scanning;

pub use ambiguity::AmbiguityTable;
pub use ast::{Diagnostic, DiagnosticSeverity, Markup, ParseError, SourceFile};
pub use config::{ConfigRegistry, ParseOptions};
pub use parsing::{parse_markup, parse_source, JxParser, ParseOutput};
