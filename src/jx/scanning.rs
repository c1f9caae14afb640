//! Tag-stack scanner
//!
//!     The scanner turns one markup value (an element or a fragment, with everything nested
//!     in it) into a flat [Token] stream in which tags are already matched. It is an explicit
//!     state machine over a byte cursor:
//!
//!         Content          character data, entities, comments, `{...}`, start/end tags
//!         InsideTag        tag name and attributes, up to `>` or `/>`; attribute names follow
//!                          HTML and take any run without whitespace, quotes, `=`, `/`, `<`,
//!                          `>` or braces (`@click`, `:value`, `aria-label`)
//!         QuotedAttribute  a quoted attribute value, up to the closing quote
//!         RawText          body of script/style, up to its own `</name>`
//!
//!     Completed start tags push a [Frame]; void elements push and pop at once and emit an
//!     [Token::ImplicitEndTag] right after their `>`. Self-closing tags never push.
//!
//! End tags
//!
//!     `</name>` is looked up from the top of the stack down to the nearest fragment frame.
//!     A match pops it, auto-closing every frame above it with an implicit end tag. No match
//!     yields an [Token::ErroneousEndTag] and leaves the stack alone. `</>` closes the nearest
//!     fragment the same way. Recovery is reported as diagnostics, never as a failure.
//!
//! Embedding
//!
//!     `{` hands the cursor to the host grammar and expects `}` where the host stopped. A host
//!     failure becomes an [Token::Error] covering the braces (resynchronized by brace
//!     counting) and the scan goes on. `attr=<el/>` runs a nested scan whose tokens are
//!     spliced in place.
//!
//! Termination
//!
//!     The scan stops as soon as the root frame is closed, leaving the rest of the input to
//!     the caller. End of input with frames still open, in a start tag, in a comment or in
//!     raw text is a [ParseError].

pub mod stack;
pub mod tags;
pub mod token;

pub use stack::{Frame, FrameKind, TagStack};
pub use token::Token;

use crate::jx::ambiguity::{Associativity, Production, Resolution};
use crate::jx::ast::diagnostics::{codes, Diagnostic};
use crate::jx::ast::elements::{AttributeNameKind, TagNameKind};
use crate::jx::ast::error::ParseError;
use crate::jx::host::HostParseError;
use crate::jx::parsing::EmbedContext;
use std::ops::Range;
use token::{entity_is_well_formed, is_tag_name, lex_at, ContentToken, TagToken};
use tracing::debug;

pub type Spanned = (Token, Range<usize>);

/// Tokens of one markup value and the offset just past it
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutput {
    pub tokens: Vec<Spanned>,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanState {
    Content,
    InsideTag,
    QuotedAttribute { quote: char },
    RawText,
}

/// A start tag whose `>` has not been seen yet
#[derive(Debug, Clone)]
struct PendingTag {
    kind: TagNameKind,
    offset: usize,
}

pub struct Scanner<'c, 'a> {
    cx: &'c mut EmbedContext<'a>,
    source: &'a str,
    pos: usize,
    state: ScanState,
    stack: TagStack,
    pending: Option<PendingTag>,
    started: bool,
    tokens: Vec<Spanned>,
    /// Character data not yet emitted: adjacent runs and malformed entities merge
    text_run: Option<Range<usize>>,
}

impl<'c, 'a> Scanner<'c, 'a> {
    pub fn new(cx: &'c mut EmbedContext<'a>) -> Self {
        let source = cx.source();
        Self {
            cx,
            source,
            pos: 0,
            state: ScanState::Content,
            stack: TagStack::new(),
            pending: None,
            started: false,
            tokens: Vec::new(),
            text_run: None,
        }
    }

    /// Scan the markup value starting at `start`, which must be at its `<`
    pub fn scan(mut self, start: usize) -> Result<ScanOutput, ParseError> {
        self.pos = start;
        while !(self.started && self.stack.is_empty() && self.state == ScanState::Content) {
            match self.state.clone() {
                ScanState::Content => self.content()?,
                ScanState::InsideTag => self.inside_tag()?,
                ScanState::QuotedAttribute { quote } => self.quoted_attribute(quote),
                ScanState::RawText => self.raw_text()?,
            }
        }
        Ok(ScanOutput {
            tokens: self.tokens,
            end: self.pos,
        })
    }

    fn emit(&mut self, token: Token, span: Range<usize>) {
        self.tokens.push((token, span));
    }

    fn report(&mut self, span: Range<usize>, message: impl Into<String>, code: &str) {
        let range = self.cx.range(span);
        self.cx.report(Diagnostic::error(range, message).with_code(code));
    }

    fn extend_text(&mut self, span: Range<usize>) {
        let merge = matches!(
            self.cx
                .table()
                .resolve(Production::TextRun, Production::TextRun),
            Some(Resolution::Associate(Associativity::Left))
        );
        match self.text_run.take() {
            Some(run) if merge => self.text_run = Some(run.start..span.end),
            Some(run) => {
                self.text_run = Some(run);
                self.flush_text();
                self.text_run = Some(span);
            }
            None => self.text_run = Some(span),
        }
    }

    fn flush_text(&mut self) {
        let Some(run) = self.text_run.take() else {
            return;
        };
        let raw = &self.source[run.clone()];
        if self.cx.options().preserve_whitespace {
            self.emit(Token::Text(raw.to_string()), run);
            return;
        }
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return;
        }
        let start = run.start + (raw.len() - raw.trim_start().len());
        let end = start + trimmed.len();
        self.emit(Token::Text(trimmed.to_string()), start..end);
    }

    fn unterminated(&self) -> ParseError {
        match self.stack.top() {
            Some(frame) if frame.is_fragment() => ParseError::UnterminatedFragment {
                location: self.cx.range(frame.offset..frame.offset + 2),
            },
            Some(frame) => ParseError::UnterminatedElement {
                tag: frame.name.clone(),
                location: self
                    .cx
                    .range(frame.offset..frame.offset + 1 + frame.name.len()),
            },
            None => ParseError::Syntax {
                message: "expected markup".to_string(),
                location: self.cx.range(self.pos..self.pos),
            },
        }
    }

    fn content(&mut self) -> Result<(), ParseError> {
        let Some((token, span)) = lex_at::<ContentToken>(self.source, self.pos) else {
            return Err(self.unterminated());
        };
        if !self.started
            && !matches!(
                token,
                Some(ContentToken::TagOpen) | Some(ContentToken::FragmentOpen)
            )
        {
            return Err(ParseError::Syntax {
                message: "expected `<` to start markup".to_string(),
                location: self.cx.range(span),
            });
        }

        match token {
            Some(ContentToken::Text) => {
                self.pos = span.end;
                self.extend_text(span);
                return Ok(());
            }
            Some(ContentToken::Entity) if entity_is_well_formed(&self.source[span.clone()]) => {
                self.flush_text();
                self.pos = span.end;
                let raw = self.source[span.clone()].to_string();
                self.emit(Token::Entity(raw), span);
                return Ok(());
            }
            Some(ContentToken::Entity) | Some(ContentToken::Ampersand) => {
                self.report(
                    span.clone(),
                    "malformed character entity",
                    codes::MALFORMED_ENTITY,
                );
                self.pos = span.end;
                self.extend_text(span);
                return Ok(());
            }
            _ => {}
        }

        self.flush_text();
        self.pos = span.end;
        match token {
            Some(ContentToken::TagOpen) => {
                self.started = true;
                self.start_tag(span)?;
            }
            Some(ContentToken::FragmentOpen) => {
                self.started = true;
                self.stack.push(Frame::fragment(span.start));
                self.emit(Token::FragmentOpen, span);
            }
            Some(ContentToken::EndTagOpen) => self.end_tag(span.start)?,
            Some(ContentToken::FragmentClose) => self.fragment_close(span),
            Some(ContentToken::CommentStart) => self.comment(span.start)?,
            Some(ContentToken::Doctype) => {
                let raw = &self.source[span.clone()];
                // `<!doctype` is nine bytes
                let text = raw[9..raw.len() - 1].trim().to_string();
                self.emit(Token::Doctype(text), span);
            }
            Some(ContentToken::BraceOpen) => self.embedded(span.start)?,
            Some(ContentToken::BraceClose) | Some(ContentToken::Greater) | None => {
                let text = &self.source[span.clone()];
                let message = format!("unexpected `{}`", text);
                self.report(span.clone(), message.clone(), codes::UNEXPECTED_CHARACTER);
                self.emit(Token::Error(message), span);
            }
            Some(ContentToken::Text | ContentToken::Entity | ContentToken::Ampersand) => {}
        }
        Ok(())
    }

    /// Tag name after `<` or `</`: `name`, `ns:name` or `a.b.c`
    fn tag_name(&mut self) -> Option<(TagNameKind, Range<usize>)> {
        let (token, span) = lex_at::<TagToken>(self.source, self.pos)?;
        if token != Some(TagToken::Name) {
            return None;
        }
        let first = self.source[span.clone()].to_string();
        let start = span.start;
        let mut end = span.end;

        let adjacent = |at: usize, expected: TagToken| {
            lex_at::<TagToken>(self.source, at)
                .filter(|(token, span)| *token == Some(expected) && span.start == at)
        };
        let kind = if let Some((_, colon)) = adjacent(end, TagToken::Colon) {
            match adjacent(colon.end, TagToken::Name) {
                Some((_, name)) => {
                    end = name.end;
                    TagNameKind::Namespaced {
                        namespace: first,
                        name: self.source[name].to_string(),
                    }
                }
                None => TagNameKind::Identifier(first),
            }
        } else {
            let mut path = vec![first];
            while let Some((_, dot)) = adjacent(end, TagToken::Dot) {
                let Some((_, name)) = adjacent(dot.end, TagToken::Name) else {
                    break;
                };
                end = name.end;
                path.push(self.source[name].to_string());
            }
            if path.len() == 1 {
                TagNameKind::Identifier(path.remove(0))
            } else {
                TagNameKind::Member(path)
            }
        };
        self.pos = end;
        Some((kind, start..end))
    }

    fn start_tag(&mut self, open: Range<usize>) -> Result<(), ParseError> {
        let Some((kind, span)) = self.tag_name() else {
            if self.stack.is_empty() {
                return Err(ParseError::Syntax {
                    message: "expected tag name after `<`".to_string(),
                    location: self.cx.range(open),
                });
            }
            let message = "expected tag name after `<`".to_string();
            self.report(open.clone(), message.clone(), codes::UNEXPECTED_CHARACTER);
            self.emit(Token::Error(message), open);
            return Ok(());
        };
        self.emit(Token::TagOpen, open.clone());
        self.emit(Token::TagName(kind.clone()), span);
        self.pending = Some(PendingTag {
            kind,
            offset: open.start,
        });
        self.state = ScanState::InsideTag;
        Ok(())
    }

    fn inside_tag(&mut self) -> Result<(), ParseError> {
        let Some((token, span)) = lex_at::<TagToken>(self.source, self.pos) else {
            let (tag, offset) = self
                .pending
                .as_ref()
                .map(|pending| (pending.kind.to_string(), pending.offset))
                .unwrap_or_default();
            return Err(ParseError::UnterminatedStartTag {
                tag,
                location: self.cx.range(offset..self.source.len()),
            });
        };

        match token {
            Some(TagToken::Close)
                if self.cx.table().prefers(Production::TagEnd, Production::GreaterThan) =>
            {
                self.pos = span.end;
                self.emit(Token::TagEnd, span.clone());
                self.complete_start_tag(span.end);
            }
            Some(TagToken::SelfClose) => {
                self.pos = span.end;
                self.pending = None;
                self.emit(Token::SelfClosingMarker, span);
                self.state = ScanState::Content;
            }
            Some(TagToken::Name | TagToken::Colon | TagToken::Dot) | None
                if self.attribute_name_end(span.start) > span.start =>
            {
                let end = self.attribute_name_end(span.start);
                self.attribute(span.start..end)?;
            }
            Some(TagToken::BraceOpen) => {
                self.pos = span.end;
                self.spread_attribute(span.start)?;
            }
            _ => {
                self.pos = span.end;
                let message = format!("unexpected `{}` in tag", &self.source[span.clone()]);
                self.report(span, message, codes::UNEXPECTED_CHARACTER);
            }
        }
        Ok(())
    }

    fn complete_start_tag(&mut self, after: usize) {
        self.state = ScanState::Content;
        let Some(pending) = self.pending.take() else {
            return;
        };
        let name = pending.kind.to_string();
        let raw = tags::is_raw_text(&pending.kind);
        let frame = Frame::element(name.clone(), tags::family(&pending.kind), raw, pending.offset);
        self.stack.push(frame);

        if tags::is_void(&pending.kind) {
            self.stack.pop();
            self.emit(Token::ImplicitEndTag(name), after..after);
        } else if raw {
            self.state = ScanState::RawText;
        }
    }

    /// End of the attribute name starting at `start`: anything up to whitespace, a quote,
    /// `=`, `/`, `<`, `>` or a brace
    fn attribute_name_end(&self, start: usize) -> usize {
        self.source[start..]
            .find(|c: char| c.is_whitespace() || "<>\"'/={}".contains(c))
            .map(|idx| start + idx)
            .unwrap_or(self.source.len())
    }

    fn attribute(&mut self, name_span: Range<usize>) -> Result<(), ParseError> {
        let text = &self.source[name_span.clone()];
        let kind = match text.split_once(':') {
            Some((namespace, name)) if is_tag_name(namespace) && is_tag_name(name) => {
                AttributeNameKind::Namespaced {
                    namespace: namespace.to_string(),
                    name: name.to_string(),
                }
            }
            _ => AttributeNameKind::Identifier(text.to_string()),
        };
        self.pos = name_span.end;
        self.emit(Token::AttributeName(kind), name_span);

        let Some((Some(TagToken::Equals), equals)) = lex_at::<TagToken>(self.source, self.pos)
        else {
            return Ok(());
        };
        self.pos = equals.end;

        match lex_at::<TagToken>(self.source, self.pos) {
            Some((Some(TagToken::DoubleQuote), quote)) => {
                self.emit(Token::Equals, equals);
                self.pos = quote.start;
                self.state = ScanState::QuotedAttribute { quote: '"' };
            }
            Some((Some(TagToken::SingleQuote), quote)) => {
                self.emit(Token::Equals, equals);
                self.pos = quote.start;
                self.state = ScanState::QuotedAttribute { quote: '\'' };
            }
            Some((Some(TagToken::BraceOpen), brace)) => {
                self.emit(Token::Equals, equals);
                self.pos = brace.end;
                self.host_expression(brace.start, false)?;
            }
            Some((Some(TagToken::Less), less)) => {
                self.emit(Token::Equals, equals);
                let nested = Scanner::new(&mut *self.cx).scan(less.start)?;
                self.tokens.extend(nested.tokens);
                self.pos = nested.end;
            }
            _ => {
                let rest = &self.source[self.pos..];
                let start = self.pos + (rest.len() - rest.trim_start().len());
                let end = self.source[start..]
                    .find(|c: char| c.is_whitespace() || "<>\"'=".contains(c))
                    .map(|idx| start + idx)
                    .unwrap_or(self.source.len());
                if end > start {
                    self.emit(Token::Equals, equals);
                    let value = self.source[start..end].to_string();
                    self.emit(Token::StringValue { value, quote: None }, start..end);
                    self.pos = end;
                } else {
                    let message = "expected attribute value".to_string();
                    self.report(equals.clone(), message.clone(), codes::UNEXPECTED_CHARACTER);
                    self.emit(Token::Error(message), equals);
                }
            }
        }
        Ok(())
    }

    /// Quoted value starting at the quote under the cursor
    ///
    /// With no closing quote anywhere, the value ends at the end of the line.
    fn quoted_attribute(&mut self, quote: char) {
        let open = self.pos;
        let body = open + quote.len_utf8();
        let (value_end, end) = match self.source[body..].find(quote) {
            Some(idx) => (body + idx, body + idx + quote.len_utf8()),
            None => {
                let stop = self.source[body..]
                    .find('\n')
                    .map(|idx| body + idx)
                    .unwrap_or(self.source.len());
                self.report(
                    open..stop,
                    "unterminated attribute value",
                    codes::UNTERMINATED_ATTRIBUTE_VALUE,
                );
                (stop, stop)
            }
        };
        let value = self.source[body..value_end].to_string();
        self.emit(
            Token::StringValue {
                value,
                quote: Some(quote),
            },
            open..end,
        );
        self.pos = end;
        self.state = ScanState::InsideTag;
    }

    fn raw_text(&mut self) -> Result<(), ParseError> {
        self.state = ScanState::Content;
        let Some(frame) = self.stack.top().filter(|frame| frame.raw).cloned() else {
            return Ok(());
        };
        let Some(found) = tags::raw_text_end(&self.source[self.pos..], &frame.name) else {
            return Err(ParseError::UnterminatedRawText {
                tag: frame.name,
                location: self.cx.range(frame.offset..self.source.len()),
            });
        };
        let end = self.pos + found;
        if end > self.pos {
            let text = self.source[self.pos..end].to_string();
            self.emit(Token::RawText(text), self.pos..end);
        }
        self.pos = end;
        Ok(())
    }

    fn end_tag(&mut self, start: usize) -> Result<(), ParseError> {
        let Some((kind, _)) = self.tag_name() else {
            let end = self.source[start..]
                .find(|c| c == '>' || c == '\n')
                .map(|idx| start + idx + 1)
                .unwrap_or(self.source.len());
            self.pos = end;
            let message = "malformed end tag".to_string();
            self.report(start..end, message.clone(), codes::UNEXPECTED_CHARACTER);
            self.emit(Token::Error(message), start..end);
            return Ok(());
        };
        match lex_at::<TagToken>(self.source, self.pos) {
            Some((Some(TagToken::Close), close)) => self.pos = close.end,
            _ => self.report(
                start..self.pos,
                "expected `>` after end tag name",
                codes::UNEXPECTED_CHARACTER,
            ),
        }
        let span = start..self.pos;
        let name = kind.to_string();

        match self.stack.find_match(&name) {
            Some(idx) => {
                self.close_above(idx, &name, start);
                self.stack.pop();
                self.emit(Token::EndTag(kind), span);
            }
            None => {
                debug!(name = %name, offset = start, "erroneous end tag");
                self.report(
                    span.clone(),
                    format!("end tag </{}> matches no open element", name),
                    codes::ERRONEOUS_END_TAG,
                );
                self.emit(Token::ErroneousEndTag(name), span);
            }
        }
        Ok(())
    }

    /// Auto-close every frame above `idx` at the end tag starting at `at`
    fn close_above(&mut self, idx: usize, closer: &str, at: usize) {
        for frame in self.stack.pop_above(idx) {
            debug!(name = %frame.name, closer = %closer, "implicit end tag");
            let range = self.cx.range(at..at);
            self.cx.report(
                Diagnostic::warning(
                    range,
                    format!("<{}> closed implicitly by </{}>", frame.name, closer),
                )
                .with_code(codes::IMPLICIT_END_TAG),
            );
            self.emit(Token::ImplicitEndTag(frame.name), at..at);
        }
    }

    fn fragment_close(&mut self, span: Range<usize>) {
        match self.stack.nearest_fragment() {
            Some(idx) => {
                self.close_above(idx, "", span.start);
                self.stack.pop();
                self.emit(Token::FragmentClose, span);
            }
            None => {
                debug!(offset = span.start, "erroneous fragment close");
                self.report(
                    span.clone(),
                    "</> matches no open fragment",
                    codes::ERRONEOUS_END_TAG,
                );
                self.emit(Token::ErroneousEndTag(String::new()), span);
            }
        }
    }

    fn comment(&mut self, start: usize) -> Result<(), ParseError> {
        let body = start + 4;
        let Some(idx) = self.source[body..].find("-->") else {
            return Err(ParseError::UnterminatedComment {
                location: self.cx.range(start..self.source.len()),
            });
        };
        let end = body + idx + 3;
        self.pos = end;
        if self.cx.options().keep_comments {
            let text = self.source[body..body + idx].to_string();
            self.emit(Token::Comment(text), start..end);
        }
        Ok(())
    }

    /// `{` in content: embedded expression or spread child
    fn embedded(&mut self, open: usize) -> Result<(), ParseError> {
        if !self
            .cx
            .table()
            .prefers(Production::EmbeddedExpression, Production::Block)
        {
            self.extend_text(open..open + 1);
            return Ok(());
        }
        let after = self.cx.host().skip_trivia(self.source, self.pos);
        let spread = self.source[after..].starts_with("...");
        if spread {
            self.pos = after + 3;
        }
        self.host_expression(open, spread)
    }

    /// `{...expr}` in attribute position
    fn spread_attribute(&mut self, open: usize) -> Result<(), ParseError> {
        let after = self.cx.host().skip_trivia(self.source, self.pos);
        if self.source[after..].starts_with("...") {
            self.pos = after + 3;
            return self.host_expression(open, true);
        }
        self.recover_braces(open, "expected `...` in spread attribute", after);
        Ok(())
    }

    /// Run the host grammar after `{` (and `...`) and expect `}` where it stopped
    ///
    /// A contained failure takes back whatever the abandoned expression reported, including
    /// diagnostics of markup nested in it. Fatal errors of nested markup fail the scan.
    fn host_expression(&mut self, open: usize, spread: bool) -> Result<(), ParseError> {
        let host = self.cx.host();
        let mark = self.cx.diagnostic_mark();
        let result = host.parse_expression(&mut *self.cx, self.pos).and_then(|(expr, end)| {
            let close = host.skip_trivia(self.source, end);
            if self.source[close..].starts_with('}') {
                Ok((expr, close + 1))
            } else {
                Err(HostParseError::new("expected `}`", close))
            }
        });
        match result {
            Ok((expression, end)) => {
                self.pos = end;
                let token = if spread {
                    Token::Spread(expression)
                } else {
                    Token::Expression(expression)
                };
                self.emit(token, open..end);
            }
            Err(HostParseError {
                fatal: Some(fatal), ..
            }) => return Err(*fatal),
            Err(err) => {
                self.cx.discard_diagnostics(mark);
                self.recover_braces(open, &err.message, err.offset);
            }
        }
        Ok(())
    }

    /// Skip to the `}` matching the `{` at `open` and emit an error token over the braces
    fn recover_braces(&mut self, open: usize, message: &str, at: usize) {
        let mut depth = 0usize;
        let mut end = self.source.len();
        for (idx, ch) in self.source[open..].char_indices() {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        end = open + idx + 1;
                        break;
                    }
                }
                _ => {}
            }
        }
        let at = at.clamp(open, end);
        let range = self.cx.range(at..at.max(end.min(at + 1)));
        self.cx.report(
            Diagnostic::error(range, format!("invalid embedded expression: {}", message))
                .with_code(codes::HOST_EXPRESSION),
        );
        self.pos = end;
        self.emit(Token::Error(message.to_string()), open..end);
    }
}
