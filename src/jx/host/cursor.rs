//! On-demand lexing over the shared source
//!
//! Host expressions are embedded in markup, so the text after an expression is usually not
//! valid host syntax. The cursor therefore never tokenizes ahead: each peek runs the logos
//! lexer from the current byte offset and stops after the tokens it needs. Backtracking is a
//! matter of restoring the offset.

use super::token::HostToken;
use super::HostParseError;
use logos::Logos;
use std::ops::Range;

/// A lexed token with its absolute byte span; `None` token means logos rejected the input
#[derive(Debug, Clone, PartialEq)]
pub struct Lexed {
    pub token: Option<HostToken>,
    pub span: Range<usize>,
}

impl Lexed {
    pub fn is(&self, token: &HostToken) -> bool {
        self.token.as_ref() == Some(token)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HostCursor<'s> {
    source: &'s str,
    pos: usize,
}

impl<'s> HostCursor<'s> {
    pub fn new(source: &'s str, pos: usize) -> Self {
        Self {
            source,
            pos: pos.min(source.len()),
        }
    }

    pub fn source(&self) -> &'s str {
        self.source
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos.min(self.source.len());
    }

    /// The `n`th token from the current position (0 is the next one)
    pub fn peek_nth(&self, n: usize) -> Option<Lexed> {
        let mut lexer = HostToken::lexer(&self.source[self.pos..]);
        let mut current = None;
        for _ in 0..=n {
            let token = lexer.next()?;
            let span = lexer.span();
            current = Some(Lexed {
                token: token.ok(),
                span: (self.pos + span.start)..(self.pos + span.end),
            });
        }
        current
    }

    pub fn peek(&self) -> Option<Lexed> {
        self.peek_nth(0)
    }

    pub fn peek_token(&self) -> Option<HostToken> {
        self.peek().and_then(|lexed| lexed.token)
    }

    pub fn at(&self, token: &HostToken) -> bool {
        self.peek().map(|lexed| lexed.is(token)).unwrap_or(false)
    }

    pub fn bump(&mut self) -> Option<Lexed> {
        let lexed = self.peek()?;
        self.pos = lexed.span.end;
        Some(lexed)
    }

    /// Consume `token` if it is next
    pub fn eat(&mut self, token: &HostToken) -> Option<Range<usize>> {
        match self.peek() {
            Some(lexed) if lexed.is(token) => {
                self.pos = lexed.span.end;
                Some(lexed.span)
            }
            _ => None,
        }
    }

    pub fn expect(&mut self, token: &HostToken, what: &str) -> Result<Range<usize>, HostParseError> {
        self.eat(token).ok_or_else(|| self.error(format!("expected {}", what)))
    }

    pub fn expect_identifier(&mut self) -> Result<(String, Range<usize>), HostParseError> {
        match self.peek() {
            Some(Lexed {
                token: Some(HostToken::Identifier(name)),
                span,
            }) => {
                self.pos = span.end;
                Ok((name, span))
            }
            _ => Err(self.error("expected identifier")),
        }
    }

    /// Offset of the next token, after whitespace and comments; the end of input if none
    pub fn next_token_start(&self) -> usize {
        self.peek()
            .map(|lexed| lexed.span.start)
            .unwrap_or(self.source.len())
    }

    pub fn at_end(&self) -> bool {
        self.peek().is_none()
    }

    /// Error positioned at the next token
    pub fn error(&self, message: impl Into<String>) -> HostParseError {
        HostParseError::new(message, self.next_token_start())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_does_not_advance() {
        let cursor = HostCursor::new("a + b", 0);
        assert_eq!(cursor.peek_token(), Some(HostToken::Identifier("a".into())));
        assert_eq!(cursor.peek_nth(1).map(|l| l.span), Some(2..3));
        assert_eq!(cursor.pos(), 0);
    }

    #[test]
    fn test_bump_and_eat() {
        let mut cursor = HostCursor::new("f(x)", 0);
        assert!(cursor.bump().is_some());
        assert_eq!(cursor.eat(&HostToken::LParen), Some(1..2));
        assert_eq!(cursor.eat(&HostToken::RParen), None);
        assert_eq!(cursor.pos(), 2);
    }

    #[test]
    fn test_spans_are_absolute() {
        let cursor = HostCursor::new("<p>{ count }</p>", 4);
        let lexed = cursor.peek().unwrap();
        assert_eq!(lexed.span, 5..10);
        assert_eq!(cursor.next_token_start(), 5);
    }

    #[test]
    fn test_next_token_start_skips_comments() {
        let cursor = HostCursor::new("x /* note */ }", 1);
        assert_eq!(cursor.next_token_start(), 13);
    }

    #[test]
    fn test_rejected_input_is_reported_as_none_token() {
        let cursor = HostCursor::new("#", 0);
        let lexed = cursor.peek().unwrap();
        assert_eq!(lexed.token, None);
    }
}
