//! Host-language expressions
//!
//!     Markup embeds expressions of a host language between `{` and `}`, and host
//!     expressions embed markup in turn (`{items.map(i -> <li>{i}</li>)}`). The two sides meet
//!     at a single seam, [HostGrammar]: the scanner hands it the shared source and a byte
//!     cursor, and gets back an [Expression] plus the cursor just past it. The host grammar
//!     reaches back into markup through [EmbedContext::parse_markup].
//!
//!     Neither side tokenizes the other's text. Offsets are absolute in the original source,
//!     so every node keeps its true location regardless of nesting depth.
//!
//!     The crate ships a Java expression grammar ([JavaExpressionGrammar]); other hosts only
//!     need to implement the trait.

pub mod cursor;
pub mod expression;
pub mod java;
pub mod token;

pub use expression::{
    AssignmentOperator, BinaryOperator, Expression, ExpressionKind, LambdaBody, LambdaParameter,
    Literal, PostfixOperator, TypeRef, UnaryOperator,
};
pub use java::JavaExpressionGrammar;

use crate::jx::ast::error::ParseError;
use crate::jx::parsing::EmbedContext;
use thiserror::Error;

/// A host expression that could not be parsed; `offset` is absolute in the source
///
/// `fatal` is set when markup nested in the expression failed with a [ParseError]. The
/// scanner contains ordinary host failures as error nodes but fails the whole parse with a
/// fatal one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at byte {offset}")]
pub struct HostParseError {
    pub message: String,
    pub offset: usize,
    pub fatal: Option<Box<ParseError>>,
}

impl HostParseError {
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
            fatal: None,
        }
    }
}

impl From<ParseError> for HostParseError {
    fn from(err: ParseError) -> Self {
        Self {
            message: err.to_string(),
            offset: err.location().span.start,
            fatal: Some(Box::new(err)),
        }
    }
}

/// The embedding seam between markup and a host language
pub trait HostGrammar: Send + Sync {
    /// Parse one expression starting at `cursor`
    ///
    /// Returns the expression and the offset just past its last token. Trailing whitespace
    /// and comments are not consumed; the scanner calls [HostGrammar::skip_trivia] before
    /// looking for the closing `}`.
    fn parse_expression(
        &self,
        cx: &mut EmbedContext<'_>,
        cursor: usize,
    ) -> Result<(Expression, usize), HostParseError>;

    /// Offset of the first non-trivia byte at or after `cursor`
    fn skip_trivia(&self, source: &str, cursor: usize) -> usize {
        let rest = source.get(cursor..).unwrap_or("");
        cursor + (rest.len() - rest.trim_start().len())
    }
}
