//! Parsing
//!
//!     Parsing is scan-then-parse, per markup value. The [Scanner](crate::jx::scanning::Scanner)
//!     matches tags over the shared source and produces a token stream; the grammar
//!     ([grammar]) assembles that stream into a [Markup] tree. A `.jx` source file adds a
//!     host-syntax header around one markup value ([module]).
//!
//!     Host expressions and markup nest inside each other. Both directions go through one
//!     [EmbedContext]: the scanner calls the host grammar with it, and the host grammar calls
//!     [EmbedContext::parse_markup] to come back. Every nested markup value gets a fresh
//!     scanner with its own tag stack; the source, the ambiguity table, the options and the
//!     diagnostics sink are shared.
//!
//! Entry points
//!
//!     [parse_source] and [parse_markup] use the default [JxParser]: the standard ambiguity
//!     table, the bundled Java expression grammar and default [ParseOptions]. Build a
//!     [JxParser] to change any of them.

pub mod grammar;
pub mod module;

use crate::jx::ambiguity::AmbiguityTable;
use crate::jx::ast::diagnostics::Diagnostic;
use crate::jx::ast::elements::{Markup, SourceFile};
use crate::jx::ast::error::ParseError;
use crate::jx::ast::range::{Range, SourceLocation};
use crate::jx::config::ParseOptions;
use crate::jx::host::{HostGrammar, JavaExpressionGrammar};
use crate::jx::scanning::{ScanOutput, Scanner, Spanned};
use grammar::GrammarContext;
use std::ops::Range as ByteRange;
use tracing::debug;

/// Shared state of one parse call, handed across the markup/host seam
pub struct EmbedContext<'a> {
    source: &'a str,
    locator: &'a SourceLocation,
    table: &'a AmbiguityTable,
    options: &'a ParseOptions,
    host: &'a dyn HostGrammar,
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl<'a> EmbedContext<'a> {
    pub fn new(
        source: &'a str,
        locator: &'a SourceLocation,
        table: &'a AmbiguityTable,
        options: &'a ParseOptions,
        host: &'a dyn HostGrammar,
        diagnostics: &'a mut Vec<Diagnostic>,
    ) -> Self {
        Self {
            source,
            locator,
            table,
            options,
            host,
            diagnostics,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn table(&self) -> &'a AmbiguityTable {
        self.table
    }

    pub fn options(&self) -> &'a ParseOptions {
        self.options
    }

    pub fn host(&self) -> &'a dyn HostGrammar {
        self.host
    }

    pub fn range(&self, span: ByteRange<usize>) -> Range {
        self.locator.range(span)
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Number of diagnostics reported so far, for [EmbedContext::discard_diagnostics]
    pub fn diagnostic_mark(&self) -> usize {
        self.diagnostics.len()
    }

    /// Drop everything reported since `mark`
    pub fn discard_diagnostics(&mut self, mark: usize) {
        self.diagnostics.truncate(mark);
    }

    /// Scan the markup value whose `<` is at `cursor`
    pub fn scan(&mut self, cursor: usize) -> Result<ScanOutput, ParseError> {
        Scanner::new(self).scan(cursor)
    }

    /// Parse the markup value whose `<` is at `cursor`; returns the offset just past it
    pub fn parse_markup(&mut self, cursor: usize) -> Result<(Markup, usize), ParseError> {
        let output = self.scan(cursor)?;
        let cx = GrammarContext {
            source: self.source,
            locator: self.locator,
        };
        let markup = grammar::parse_markup_tokens(cx, output.tokens)?;
        Ok((markup, output.end))
    }
}

/// A parsed value with the recoverable findings collected on the way
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> ParseOutput<T> {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|diag| diag.is_error())
    }
}

/// Parser configuration: ambiguity table, host grammar and options
pub struct JxParser<'t> {
    table: &'t AmbiguityTable,
    host: Box<dyn HostGrammar>,
    options: ParseOptions,
}

impl Default for JxParser<'static> {
    fn default() -> Self {
        Self {
            table: AmbiguityTable::standard(),
            host: Box::new(JavaExpressionGrammar),
            options: ParseOptions::default(),
        }
    }
}

impl JxParser<'static> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'t> JxParser<'t> {
    pub fn with_table<'u>(self, table: &'u AmbiguityTable) -> JxParser<'u> {
        JxParser {
            table,
            host: self.host,
            options: self.options,
        }
    }

    pub fn with_host(mut self, host: impl HostGrammar + 'static) -> Self {
        self.host = Box::new(host);
        self
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    fn run<T>(
        &self,
        source: &str,
        f: impl FnOnce(&mut EmbedContext<'_>) -> Result<T, ParseError>,
    ) -> Result<ParseOutput<T>, ParseError> {
        let locator = SourceLocation::new(source);
        let mut diagnostics = Vec::new();
        let value = {
            let mut cx = EmbedContext::new(
                source,
                &locator,
                self.table,
                &self.options,
                self.host.as_ref(),
                &mut diagnostics,
            );
            f(&mut cx)?
        };
        Ok(ParseOutput { value, diagnostics })
    }

    /// Parse a complete source file: header plus module body
    pub fn parse_source(&self, source: &str) -> Result<ParseOutput<SourceFile>, ParseError> {
        let result = self.run(source, module::parse_source_file);
        match &result {
            Ok(output) => debug!(
                module = %output.value.module.name,
                diagnostics = output.diagnostics.len(),
                "parsed source file"
            ),
            Err(err) => debug!(error = %err, "source file failed to parse"),
        }
        result
    }

    /// Parse a document consisting of a single markup value
    pub fn parse_markup(&self, source: &str) -> Result<ParseOutput<Markup>, ParseError> {
        let result = self.run(source, |cx| {
            let (markup, end) = cx.parse_markup(leading_whitespace_end(source))?;
            expect_only_whitespace(cx, end)?;
            Ok(markup)
        });
        if let Ok(output) = &result {
            debug!(diagnostics = output.diagnostics.len(), "parsed markup");
        }
        result
    }

    /// Scanner tokens of a document consisting of a single markup value
    pub fn scan(&self, source: &str) -> Result<ParseOutput<Vec<Spanned>>, ParseError> {
        self.run(source, |cx| {
            let output = cx.scan(leading_whitespace_end(source))?;
            expect_only_whitespace(cx, output.end)?;
            Ok(output.tokens)
        })
    }
}

fn leading_whitespace_end(source: &str) -> usize {
    source.len() - source.trim_start().len()
}

fn expect_only_whitespace(cx: &EmbedContext<'_>, end: usize) -> Result<(), ParseError> {
    let rest = &cx.source()[end..];
    if rest.trim().is_empty() {
        return Ok(());
    }
    let start = end + (rest.len() - rest.trim_start().len());
    Err(ParseError::TrailingInput {
        location: cx.range(start..cx.source().len()),
    })
}

/// Parse a `.jx` source file with the default parser
pub fn parse_source(source: &str) -> Result<ParseOutput<SourceFile>, ParseError> {
    JxParser::default().parse_source(source)
}

/// Parse a single markup value with the default parser
pub fn parse_markup(source: &str) -> Result<ParseOutput<Markup>, ParseError> {
    JxParser::default().parse_markup(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jx::ast::elements::Child;

    #[test]
    fn test_parse_markup_trailing_input() {
        assert!(parse_markup("  <p/>  \n").is_ok());
        let err = parse_markup("<p/> tail").unwrap_err();
        assert!(matches!(err, ParseError::TrailingInput { .. }));
        assert_eq!(err.location().span, 5..9);
    }

    #[test]
    fn test_nested_markup_in_expression() {
        let output = parse_markup("<ul>{items.map(i -> <li>{i}</li>)}</ul>").unwrap();
        let ul = output.value.as_element().unwrap();
        let Child::Expression(embedded) = &ul.children[0] else {
            panic!("expected embedded expression");
        };
        let nested = embedded.expression.markup();
        assert_eq!(nested.len(), 1);
        let li = nested[0].as_element().unwrap();
        assert_eq!(li.name.text(), "li");
        assert_eq!(li.location.span, 20..32);
        assert!(output.diagnostics.is_empty());
    }

    #[test]
    fn test_options_are_applied() {
        let parser = JxParser::new().with_options(ParseOptions::default().preserve_whitespace(true));
        let output = parser.parse_markup("<p> x </p>").unwrap();
        assert_eq!(output.value.children()[0].as_text(), Some(" x "));
    }

    #[test]
    fn test_error_output_helpers() {
        let output = parse_markup("<a></b></a>").unwrap();
        assert!(output.has_errors());
        assert_eq!(output.errors().count(), 1);
    }

    #[test]
    fn test_scan_entry_point() {
        let output = JxParser::new().scan("<br>").unwrap();
        assert_eq!(output.value.len(), 4);
    }
}
