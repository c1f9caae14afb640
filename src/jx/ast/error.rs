//! Fatal parse errors
//!
//! Everything recoverable is reported as a [Diagnostic](super::Diagnostic) next to a complete
//! tree. A [ParseError] means no tree could be produced for the document.

use crate::jx::ast::range::Range;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unterminated raw text in <{tag}> starting at {location}")]
    UnterminatedRawText { tag: String, location: Range },

    #[error("unterminated element <{tag}> opened at {location}")]
    UnterminatedElement { tag: String, location: Range },

    #[error("unterminated fragment opened at {location}")]
    UnterminatedFragment { location: Range },

    #[error("unterminated start tag <{tag}> at {location}")]
    UnterminatedStartTag { tag: String, location: Range },

    #[error("unterminated comment at {location}")]
    UnterminatedComment { location: Range },

    #[error("{message} at {location}")]
    Syntax { message: String, location: Range },

    #[error("unexpected input after markup at {location}")]
    TrailingInput { location: Range },
}

impl ParseError {
    pub fn location(&self) -> &Range {
        match self {
            ParseError::UnterminatedRawText { location, .. }
            | ParseError::UnterminatedElement { location, .. }
            | ParseError::UnterminatedFragment { location }
            | ParseError::UnterminatedStartTag { location, .. }
            | ParseError::UnterminatedComment { location }
            | ParseError::Syntax { location, .. }
            | ParseError::TrailingInput { location } => location,
        }
    }
}

/// Render the lines around `range`, marking the offending line with `>>`
///
/// Two lines of context on each side, 1-indexed line numbers.
pub fn format_source_context(source: &str, range: &Range) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let error_line = range.start.line;
    let first = error_line.saturating_sub(2);
    let last = (error_line + 3).min(lines.len());

    let mut context = String::new();
    for (idx, line) in lines.iter().enumerate().take(last).skip(first) {
        let marker = if idx == error_line { ">>" } else { "  " };
        context.push_str(&format!("{} {:3} | {}\n", marker, idx + 1, line));
    }
    context
}
