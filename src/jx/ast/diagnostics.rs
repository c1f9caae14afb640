//! Recoverable findings reported alongside a parsed tree
//!
//! The parser never aborts on a mismatched end tag, a malformed entity, an unterminated
//! quoted attribute value or a broken host expression. Each of those still yields a tree and
//! is reported here, with the shape editors expect (range, severity, message, code, source).

use super::range::Range;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Information,
    Hint,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticSeverity::Error => write!(f, "error"),
            DiagnosticSeverity::Warning => write!(f, "warning"),
            DiagnosticSeverity::Information => write!(f, "info"),
            DiagnosticSeverity::Hint => write!(f, "hint"),
        }
    }
}

/// Codes attached to diagnostics produced by this crate
pub mod codes {
    pub const ERRONEOUS_END_TAG: &str = "erroneous-end-tag";
    pub const IMPLICIT_END_TAG: &str = "implicit-end-tag";
    pub const MALFORMED_ENTITY: &str = "malformed-entity";
    pub const UNTERMINATED_ATTRIBUTE_VALUE: &str = "unterminated-attribute-value";
    pub const HOST_EXPRESSION: &str = "host-expression";
    pub const UNEXPECTED_CHARACTER: &str = "unexpected-character";
    pub const DEFERRED_AMBIGUITY: &str = "deferred-ambiguity";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub range: Range,
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub code: Option<String>,
    pub source: String,
}

impl Diagnostic {
    pub fn new(range: Range, severity: DiagnosticSeverity, message: impl Into<String>) -> Self {
        Self {
            range,
            severity,
            message: message.into(),
            code: None,
            source: "jx".to_string(),
        }
    }

    pub fn error(range: Range, message: impl Into<String>) -> Self {
        Self::new(range, DiagnosticSeverity::Error, message)
    }

    pub fn warning(range: Range, message: impl Into<String>) -> Self {
        Self::new(range, DiagnosticSeverity::Warning, message)
    }

    pub fn hint(range: Range, message: impl Into<String>) -> Self {
        Self::new(range, DiagnosticSeverity::Hint, message)
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == DiagnosticSeverity::Error
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.code.as_deref() == Some(code)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]: {} at {}",
            self.severity, self.source, self.message, self.range.start
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jx::ast::range::SourceLocation;

    #[test]
    fn test_diagnostic_display() {
        let loc = SourceLocation::new("<a>\n</b>");
        let diag = Diagnostic::error(loc.range(4..8), "end tag </b> matches no open element")
            .with_code(codes::ERRONEOUS_END_TAG);
        assert_eq!(
            diag.to_string(),
            "error [jx]: end tag </b> matches no open element at 1:0"
        );
        assert!(diag.is_error());
        assert!(diag.has_code("erroneous-end-tag"));
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(DiagnosticSeverity::Hint.to_string(), "hint");
        assert_eq!(DiagnosticSeverity::Information.to_string(), "info");
    }
}
