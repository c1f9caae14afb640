//! Java expression grammar
//!
//! A precedence-climbing parser over [HostToken]s. Binding powers come from the ambiguity
//! table's operator rules, and every place where Java syntax collides with markup or with
//! itself asks the table which reading to build:
//!
//! - `<` in operand position opens nested markup, in operator position it compares
//! - `x -> ...` and `(a, b) -> ...` are lambdas, not names or parenthesized expressions
//! - `(Type) x` is a cast; `(Name) - x` is deferred and read as a binary expression
//!
//! The grammar stops at the first token that cannot continue the expression, so the `}` that
//! closes an embedded expression is left for the scanner.

use super::cursor::HostCursor;
use super::expression::{
    is_primitive_type, AssignmentOperator, BinaryOperator, Expression, ExpressionKind, LambdaBody,
    LambdaParameter, Literal, PostfixOperator, TypeRef, UnaryOperator,
};
use super::token::HostToken;
use super::{HostGrammar, HostParseError};
use crate::jx::ambiguity::{Associativity, Production};
use crate::jx::ast::diagnostics::{codes, Diagnostic};
use crate::jx::parsing::EmbedContext;

#[derive(Debug, Default, Clone, Copy)]
pub struct JavaExpressionGrammar;

impl HostGrammar for JavaExpressionGrammar {
    fn parse_expression(
        &self,
        cx: &mut EmbedContext<'_>,
        cursor: usize,
    ) -> Result<(Expression, usize), HostParseError> {
        let source = cx.source();
        let mut parser = ExpressionParser {
            cx,
            cursor: HostCursor::new(source, cursor),
        };
        let expression = parser.expression()?;
        Ok((expression, parser.cursor.pos()))
    }

    fn skip_trivia(&self, source: &str, cursor: usize) -> usize {
        HostCursor::new(source, cursor).next_token_start()
    }
}

/// Parse a type: dotted name, optional type arguments, array dimensions
pub fn parse_type(cursor: &mut HostCursor<'_>) -> Result<TypeRef, HostParseError> {
    if cursor.eat(&HostToken::Question).is_some() {
        return Ok(TypeRef::simple("?"));
    }
    let (mut name, _) = cursor
        .expect_identifier()
        .map_err(|_| cursor.error("expected type"))?;
    while cursor.at(&HostToken::Dot) && next_is_identifier(cursor, 1) {
        cursor.bump();
        let (part, _) = cursor.expect_identifier()?;
        name.push('.');
        name.push_str(&part);
    }

    let mut arguments = Vec::new();
    if cursor.eat(&HostToken::Lt).is_some() && cursor.eat(&HostToken::Gt).is_none() {
        loop {
            arguments.push(parse_type(cursor)?);
            if cursor.eat(&HostToken::Comma).is_none() {
                break;
            }
        }
        cursor.expect(&HostToken::Gt, "`>` after type arguments")?;
    }

    let mut dimensions = 0;
    while cursor.at(&HostToken::LBracket)
        && cursor.peek_nth(1).is_some_and(|next| next.is(&HostToken::RBracket))
    {
        cursor.bump();
        cursor.bump();
        dimensions += 1;
    }

    Ok(TypeRef {
        name,
        arguments,
        dimensions,
    })
}

fn next_is_identifier(cursor: &HostCursor<'_>, n: usize) -> bool {
    matches!(
        cursor.peek_nth(n).and_then(|lexed| lexed.token),
        Some(HostToken::Identifier(_))
    )
}

#[derive(Debug, Clone, Copy)]
enum Infix {
    Binary(BinaryOperator),
    Assign(AssignmentOperator),
    Conditional,
    InstanceOf,
}

impl Infix {
    fn symbol(&self) -> &'static str {
        match self {
            Infix::Binary(op) => op.symbol(),
            Infix::Assign(op) => op.symbol(),
            Infix::Conditional => "?",
            Infix::InstanceOf => "instanceof",
        }
    }
}

struct ExpressionParser<'c, 'a> {
    cx: &'c mut EmbedContext<'a>,
    cursor: HostCursor<'a>,
}

type ParseResult<T> = Result<T, HostParseError>;

impl<'c, 'a> ExpressionParser<'c, 'a> {
    fn expression(&mut self) -> ParseResult<Expression> {
        self.expression_bp(0)
    }

    fn located(&self, kind: ExpressionKind, start: usize) -> Expression {
        Expression::new(kind, self.cx.range(start..self.cursor.pos()))
    }

    fn expression_bp(&mut self, min_precedence: u8) -> ParseResult<Expression> {
        let start = self.cursor.next_token_start();
        let mut left = self.unary()?;

        while let Some((infix, end)) = self.peek_infix() {
            let Some(rule) = self.cx.table().operator(infix.symbol()) else {
                break;
            };
            if rule.precedence < min_precedence {
                break;
            }
            let next_min = match rule.associativity {
                Associativity::Left => rule.precedence + 1,
                Associativity::Right => rule.precedence,
            };
            self.cursor.set_pos(end);

            let kind = match infix {
                Infix::Binary(op) => ExpressionKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(self.expression_bp(next_min)?),
                },
                Infix::Assign(op) => ExpressionKind::Assignment {
                    op,
                    target: Box::new(left),
                    value: Box::new(self.expression_bp(next_min)?),
                },
                Infix::Conditional => {
                    let then_branch = self.expression()?;
                    self.cursor.expect(&HostToken::Colon, "`:` in conditional")?;
                    ExpressionKind::Conditional {
                        condition: Box::new(left),
                        then_branch: Box::new(then_branch),
                        else_branch: Box::new(self.expression_bp(next_min)?),
                    }
                }
                Infix::InstanceOf => ExpressionKind::InstanceOf {
                    operand: Box::new(left),
                    ty: parse_type(&mut self.cursor)?,
                },
            };
            left = self.located(kind, start);
        }
        Ok(left)
    }

    /// The operator at the cursor and the offset just past it
    ///
    /// `>` tokens are never merged by the lexer; adjacent ones form shifts here.
    fn peek_infix(&self) -> Option<(Infix, usize)> {
        use AssignmentOperator as A;
        use BinaryOperator as B;

        let first = self.cursor.peek()?;
        let token = first.token.clone()?;
        let infix = match token {
            HostToken::Gt => return Some(self.closing_angles(first.span.end)),
            HostToken::Lt => {
                if !self
                    .cx
                    .table()
                    .prefers(Production::LessThan, Production::TypeArguments)
                {
                    return None;
                }
                Infix::Binary(B::Lt)
            }
            HostToken::Assign => Infix::Assign(A::Assign),
            HostToken::PlusAssign => Infix::Assign(A::Add),
            HostToken::MinusAssign => Infix::Assign(A::Sub),
            HostToken::StarAssign => Infix::Assign(A::Mul),
            HostToken::SlashAssign => Infix::Assign(A::Div),
            HostToken::PercentAssign => Infix::Assign(A::Rem),
            HostToken::AmpAssign => Infix::Assign(A::BitAnd),
            HostToken::PipeAssign => Infix::Assign(A::BitOr),
            HostToken::CaretAssign => Infix::Assign(A::BitXor),
            HostToken::ShlAssign => Infix::Assign(A::Shl),
            HostToken::Question => Infix::Conditional,
            HostToken::InstanceOf => Infix::InstanceOf,
            HostToken::OrOr => Infix::Binary(B::Or),
            HostToken::AndAnd => Infix::Binary(B::And),
            HostToken::Pipe => Infix::Binary(B::BitOr),
            HostToken::Caret => Infix::Binary(B::BitXor),
            HostToken::Amp => Infix::Binary(B::BitAnd),
            HostToken::EqEq => Infix::Binary(B::Eq),
            HostToken::NotEq => Infix::Binary(B::Ne),
            HostToken::LtEq => Infix::Binary(B::Le),
            HostToken::GtEq => Infix::Binary(B::Ge),
            HostToken::Shl => Infix::Binary(B::Shl),
            HostToken::Plus => Infix::Binary(B::Add),
            HostToken::Minus => Infix::Binary(B::Sub),
            HostToken::Star => Infix::Binary(B::Mul),
            HostToken::Slash => Infix::Binary(B::Div),
            HostToken::Percent => Infix::Binary(B::Rem),
            _ => return None,
        };
        Some((infix, first.span.end))
    }

    fn closing_angles(&self, first_end: usize) -> (Infix, usize) {
        let adjacent = |n: usize, end: usize| {
            self.cursor
                .peek_nth(n)
                .filter(|lexed| lexed.span.start == end)
        };
        match adjacent(1, first_end) {
            Some(second) if second.is(&HostToken::Gt) => match adjacent(2, second.span.end) {
                Some(third) if third.is(&HostToken::Gt) => {
                    (Infix::Binary(BinaryOperator::UShr), third.span.end)
                }
                Some(third) if third.is(&HostToken::GtEq) => {
                    (Infix::Assign(AssignmentOperator::UShr), third.span.end)
                }
                _ => (Infix::Binary(BinaryOperator::Shr), second.span.end),
            },
            Some(second) if second.is(&HostToken::GtEq) => {
                (Infix::Assign(AssignmentOperator::Shr), second.span.end)
            }
            _ => (Infix::Binary(BinaryOperator::Gt), first_end),
        }
    }

    fn unary(&mut self) -> ParseResult<Expression> {
        let Some(lexed) = self.cursor.peek() else {
            return Err(self.cursor.error("expected expression"));
        };
        let start = lexed.span.start;
        let op = match lexed.token {
            Some(HostToken::Bang) => Some(UnaryOperator::Not),
            Some(HostToken::Minus) => Some(UnaryOperator::Negate),
            Some(HostToken::Plus) => Some(UnaryOperator::Plus),
            Some(HostToken::Tilde) => Some(UnaryOperator::BitNot),
            Some(HostToken::PlusPlus) => Some(UnaryOperator::PreIncrement),
            Some(HostToken::MinusMinus) => Some(UnaryOperator::PreDecrement),
            _ => None,
        };
        if let Some(op) = op {
            self.cursor.bump();
            let operand = self.unary()?;
            return Ok(self.located(
                ExpressionKind::Unary {
                    op,
                    operand: Box::new(operand),
                },
                start,
            ));
        }

        if self.lambda_ahead() {
            return self.lambda();
        }
        if lexed.is(&HostToken::LParen) {
            if let Some(cast) = self.try_cast()? {
                return Ok(cast);
            }
        }
        let primary = self.primary()?;
        self.selectors(primary, start)
    }

    /// Identifier or balanced parentheses followed by `->`
    fn lambda_ahead(&self) -> bool {
        let mut probe = self.cursor;
        let competing = match probe.peek_token() {
            Some(HostToken::Identifier(_)) => {
                probe.bump();
                Production::PrimaryExpression
            }
            Some(HostToken::LParen) => {
                let mut depth = 0usize;
                loop {
                    match probe.bump().and_then(|lexed| lexed.token) {
                        Some(HostToken::LParen) => depth += 1,
                        Some(HostToken::RParen) => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        Some(HostToken::LBrace | HostToken::RBrace | HostToken::Semicolon)
                        | None => return false,
                        Some(_) => {}
                    }
                }
                Production::Parenthesized
            }
            _ => return false,
        };
        probe.at(&HostToken::Arrow) && self.cx.table().prefers(Production::Lambda, competing)
    }

    fn lambda(&mut self) -> ParseResult<Expression> {
        let start = self.cursor.next_token_start();
        let mut parameters = Vec::new();
        let parenthesized = self.cursor.eat(&HostToken::LParen).is_some();
        if parenthesized {
            while !self.cursor.at(&HostToken::RParen) {
                self.cursor.eat(&HostToken::Final);
                let bare = next_is_identifier(&self.cursor, 0)
                    && matches!(
                        self.cursor.peek_nth(1).and_then(|lexed| lexed.token),
                        Some(HostToken::Comma | HostToken::RParen)
                    );
                let ty = if bare {
                    None
                } else {
                    Some(parse_type(&mut self.cursor)?)
                };
                let (name, _) = self.cursor.expect_identifier()?;
                parameters.push(LambdaParameter { ty, name });
                if self.cursor.eat(&HostToken::Comma).is_none() {
                    break;
                }
            }
            self.cursor
                .expect(&HostToken::RParen, "`)` after lambda parameters")?;
        } else {
            let (name, _) = self.cursor.expect_identifier()?;
            parameters.push(LambdaParameter { ty: None, name });
        }
        self.cursor.expect(&HostToken::Arrow, "`->`")?;

        let body = if self.cursor.at(&HostToken::LBrace) {
            LambdaBody::Block(self.block()?)
        } else {
            LambdaBody::Expression(Box::new(self.expression()?))
        };
        Ok(self.located(
            ExpressionKind::Lambda {
                parameters,
                parenthesized,
                body,
            },
            start,
        ))
    }

    /// A brace-balanced block, kept as written
    fn block(&mut self) -> ParseResult<String> {
        let start = self.cursor.next_token_start();
        let mut depth = 0usize;
        loop {
            let Some(lexed) = self.cursor.bump() else {
                return Err(HostParseError::new("unterminated block", start));
            };
            match lexed.token {
                Some(HostToken::LBrace) => depth += 1,
                Some(HostToken::RBrace) => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }
        let text = self.cx.source().get(start..self.cursor.pos()).unwrap_or("");
        Ok(text.to_string())
    }

    /// `(Type) operand`, or `None` with the cursor untouched
    fn try_cast(&mut self) -> ParseResult<Option<Expression>> {
        let saved = self.cursor;
        let start = self.cursor.next_token_start();
        self.cursor.bump();
        let ty = match parse_type(&mut self.cursor) {
            Ok(ty) if self.cursor.eat(&HostToken::RParen).is_some() => ty,
            _ => {
                self.cursor = saved;
                return Ok(None);
            }
        };

        let next = self.cursor.peek_token();
        let is_cast = if is_primitive_type(&ty.name) && ty.arguments.is_empty() {
            true
        } else {
            match &next {
                Some(token) if token.starts_operand() => true,
                Some(HostToken::Plus | HostToken::Minus) => {
                    let resolution = self.cx.table().resolve(Production::Cast, Production::Binary);
                    let chosen = resolution
                        .map(|r| r.chosen(Production::Binary))
                        .unwrap_or(Production::Binary);
                    if resolution.is_some_and(|r| r.is_deferred()) {
                        let range = self.cx.range(start..self.cursor.pos());
                        self.cx.report(
                            Diagnostic::hint(
                                range,
                                format!("`({})` may be a cast; read as a parenthesized operand", ty),
                            )
                            .with_code(codes::DEFERRED_AMBIGUITY),
                        );
                    }
                    chosen == Production::Cast
                }
                _ => false,
            }
        };

        if !is_cast || !self.cx.table().prefers(Production::Cast, Production::Parenthesized) {
            self.cursor = saved;
            return Ok(None);
        }
        let operand = self.unary()?;
        Ok(Some(self.located(
            ExpressionKind::Cast {
                ty,
                operand: Box::new(operand),
            },
            start,
        )))
    }

    fn primary(&mut self) -> ParseResult<Expression> {
        let Some(lexed) = self.cursor.peek() else {
            return Err(self.cursor.error("expected expression"));
        };
        let start = lexed.span.start;
        let Some(token) = lexed.token else {
            return Err(self.cursor.error("unexpected character"));
        };

        let kind = match token {
            HostToken::Lt => return self.markup(start),
            HostToken::IntegerLiteral(text) => ExpressionKind::Literal(Literal::Integer(text)),
            HostToken::FloatLiteral(text) => ExpressionKind::Literal(Literal::Float(text)),
            HostToken::StringLiteral(text) => ExpressionKind::Literal(Literal::String(text)),
            HostToken::CharLiteral(text) => ExpressionKind::Literal(Literal::Char(text)),
            HostToken::True => ExpressionKind::Literal(Literal::Boolean(true)),
            HostToken::False => ExpressionKind::Literal(Literal::Boolean(false)),
            HostToken::Null => ExpressionKind::Literal(Literal::Null),
            HostToken::This => ExpressionKind::This,
            HostToken::New => {
                self.cursor.bump();
                let ty = parse_type(&mut self.cursor)?;
                let arguments = self.arguments()?;
                return Ok(self.located(ExpressionKind::New { ty, arguments }, start));
            }
            HostToken::LParen => {
                self.cursor.bump();
                let inner = self.expression()?;
                self.cursor.expect(&HostToken::RParen, "`)`")?;
                return Ok(self.located(ExpressionKind::Parenthesized(Box::new(inner)), start));
            }
            HostToken::Identifier(name) => {
                self.cursor.bump();
                if !self.cursor.at(&HostToken::LParen) {
                    return Ok(self.located(ExpressionKind::Name(name), start));
                }
                let arguments = self.arguments()?;
                return Ok(self.located(
                    ExpressionKind::MethodCall {
                        receiver: None,
                        type_arguments: Vec::new(),
                        name,
                        arguments,
                    },
                    start,
                ));
            }
            _ => return Err(self.cursor.error("expected expression")),
        };
        self.cursor.bump();
        Ok(self.located(kind, start))
    }

    /// `<` in operand position: nested markup
    fn markup(&mut self, start: usize) -> ParseResult<Expression> {
        if !self
            .cx
            .table()
            .prefers(Production::MarkupOpen, Production::TypeArguments)
        {
            return Err(self.cursor.error("expected expression"));
        }
        let (markup, end) = self.cx.parse_markup(start)?;
        self.cursor.set_pos(end);
        let location = markup.location().clone();
        Ok(Expression::new(
            ExpressionKind::Markup(Box::new(markup)),
            location,
        ))
    }

    fn arguments(&mut self) -> ParseResult<Vec<Expression>> {
        self.cursor.expect(&HostToken::LParen, "`(`")?;
        let mut arguments = Vec::new();
        if self.cursor.eat(&HostToken::RParen).is_some() {
            return Ok(arguments);
        }
        loop {
            arguments.push(self.expression()?);
            if self.cursor.eat(&HostToken::Comma).is_none() {
                break;
            }
        }
        self.cursor.expect(&HostToken::RParen, "`)` after arguments")?;
        Ok(arguments)
    }

    /// Field access, calls, indexing and postfix operators
    fn selectors(&mut self, mut left: Expression, start: usize) -> ParseResult<Expression> {
        loop {
            let kind = match self.cursor.peek_token() {
                Some(HostToken::Dot) => {
                    self.cursor.bump();
                    let mut type_arguments = Vec::new();
                    if self.cursor.eat(&HostToken::Lt).is_some() {
                        loop {
                            type_arguments.push(parse_type(&mut self.cursor)?);
                            if self.cursor.eat(&HostToken::Comma).is_none() {
                                break;
                            }
                        }
                        self.cursor
                            .expect(&HostToken::Gt, "`>` after type arguments")?;
                    }
                    let (name, _) = self.cursor.expect_identifier()?;
                    if self.cursor.at(&HostToken::LParen) || !type_arguments.is_empty() {
                        ExpressionKind::MethodCall {
                            receiver: Some(Box::new(left)),
                            type_arguments,
                            name,
                            arguments: self.arguments()?,
                        }
                    } else {
                        ExpressionKind::FieldAccess {
                            object: Box::new(left),
                            field: name,
                        }
                    }
                }
                Some(HostToken::LBracket) => {
                    self.cursor.bump();
                    let index = self.expression()?;
                    self.cursor.expect(&HostToken::RBracket, "`]`")?;
                    ExpressionKind::ArrayAccess {
                        array: Box::new(left),
                        index: Box::new(index),
                    }
                }
                Some(HostToken::PlusPlus) => {
                    self.cursor.bump();
                    ExpressionKind::Postfix {
                        op: PostfixOperator::Increment,
                        operand: Box::new(left),
                    }
                }
                Some(HostToken::MinusMinus) => {
                    self.cursor.bump();
                    ExpressionKind::Postfix {
                        op: PostfixOperator::Decrement,
                        operand: Box::new(left),
                    }
                }
                _ => return Ok(left),
            };
            left = self.located(kind, start);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jx::ambiguity::AmbiguityTable;
    use crate::jx::ast::range::SourceLocation;
    use crate::jx::config::ParseOptions;

    fn parse_with(
        source: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> ParseResult<(Expression, usize)> {
        let locator = SourceLocation::new(source);
        let options = ParseOptions::default();
        let mut cx = EmbedContext::new(
            source,
            &locator,
            AmbiguityTable::standard(),
            &options,
            &JavaExpressionGrammar,
            diagnostics,
        );
        JavaExpressionGrammar.parse_expression(&mut cx, 0)
    }

    fn parse(source: &str) -> Expression {
        parse_with(source, &mut Vec::new()).unwrap().0
    }

    fn print(source: &str) -> String {
        parse(source).to_string()
    }

    #[test]
    fn test_precedence() {
        let expr = parse("a + b * c");
        match expr.kind {
            ExpressionKind::Binary { op, right, .. } => {
                assert_eq!(op, BinaryOperator::Add);
                assert!(matches!(
                    right.kind,
                    ExpressionKind::Binary {
                        op: BinaryOperator::Mul,
                        ..
                    }
                ));
            }
            other => panic!("expected binary, got {:?}", other),
        }
    }

    #[test]
    fn test_left_and_right_associativity() {
        match parse("a - b - c").kind {
            ExpressionKind::Binary { left, .. } => {
                assert!(matches!(left.kind, ExpressionKind::Binary { .. }))
            }
            other => panic!("unexpected {:?}", other),
        }
        match parse("a = b = c").kind {
            ExpressionKind::Assignment { value, .. } => {
                assert!(matches!(value.kind, ExpressionKind::Assignment { .. }))
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_stops_before_closing_brace() {
        let (expr, end) = parse_with("count }", &mut Vec::new()).unwrap();
        assert_eq!(expr.to_string(), "count");
        assert_eq!(end, 5);
    }

    #[test]
    fn test_shift_operators_from_single_angles() {
        assert_eq!(print("a >> 2"), "a >> 2");
        assert_eq!(print("a >>> 2"), "a >>> 2");
        assert_eq!(print("a >>= 2"), "a >>= 2");
        assert!(parse_with("a > > 2", &mut Vec::new()).is_err());
    }

    #[test]
    fn test_calls_fields_and_indexing() {
        assert_eq!(
            print("this.items.get(i)[0].name"),
            "this.items.get(i)[0].name"
        );
        assert_eq!(print("Util.<String>empty()"), "Util.<String>empty()");
        assert_eq!(
            print("new HashMap<String, List<Integer>>()"),
            "new HashMap<String, List<Integer>>()"
        );
    }

    #[test]
    fn test_lambdas() {
        assert_eq!(print("x -> x + 1"), "x -> x + 1");
        assert_eq!(print("(a, b) -> a * b"), "(a, b) -> a * b");
        assert_eq!(print("(int a) -> a"), "(int a) -> a");
        assert_eq!(print("() -> { return 1; }"), "() -> { return 1; }");
    }

    #[test]
    fn test_casts() {
        assert!(matches!(parse("(int) x").kind, ExpressionKind::Cast { .. }));
        assert!(matches!(parse("(String) value").kind, ExpressionKind::Cast { .. }));
        assert!(matches!(parse("(int) -x").kind, ExpressionKind::Cast { .. }));
        assert!(matches!(
            parse("(a + b) * c").kind,
            ExpressionKind::Binary { .. }
        ));
        assert!(matches!(parse("(a).b").kind, ExpressionKind::FieldAccess { .. }));
    }

    #[test]
    fn test_cast_binary_ambiguity_is_deferred() {
        let mut diagnostics = Vec::new();
        let (expr, _) = parse_with("(a) - b", &mut diagnostics).unwrap();
        assert!(matches!(
            expr.kind,
            ExpressionKind::Binary {
                op: BinaryOperator::Sub,
                ..
            }
        ));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].has_code(codes::DEFERRED_AMBIGUITY));
    }

    #[test]
    fn test_conditional_and_instanceof() {
        assert_eq!(print("a ? b : c ? d : e"), "a ? b : c ? d : e");
        match parse("a ? b : c ? d : e").kind {
            ExpressionKind::Conditional { else_branch, .. } => {
                assert!(matches!(else_branch.kind, ExpressionKind::Conditional { .. }))
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(print("x instanceof List<String>"), "x instanceof List<String>");
    }

    #[test]
    fn test_unary_and_postfix() {
        assert_eq!(print("!done && -n < ++i"), "!done && -n < ++i");
        assert!(matches!(parse("i++").kind, ExpressionKind::Postfix { .. }));
    }

    #[test]
    fn test_markup_in_operand_position() {
        let expr = parse("ok ? <b>yes</b> : <i/>");
        let markup = expr.markup();
        assert_eq!(markup.len(), 2);
        assert_eq!(expr.to_string(), "ok ? <b>yes</b> : <i/>");
    }

    #[test]
    fn test_less_than_in_operator_position() {
        assert!(matches!(
            parse("a < b").kind,
            ExpressionKind::Binary {
                op: BinaryOperator::Lt,
                ..
            }
        ));
    }

    #[test]
    fn test_locations_are_absolute() {
        let expr = parse("  foo(bar)");
        assert_eq!(expr.span(), 2..10);
    }

    #[test]
    fn test_errors() {
        assert!(parse_with("", &mut Vec::new()).is_err());
        assert!(parse_with("a +", &mut Vec::new()).is_err());
        let err = parse_with("f(a,", &mut Vec::new()).unwrap_err();
        assert_eq!(err.offset, 4);
        assert!(parse_with("#", &mut Vec::new()).is_err());
    }

    #[test]
    fn test_parse_type() {
        let mut cursor = HostCursor::new("java.util.Map<String, int[]>[] rest", 0);
        let ty = parse_type(&mut cursor).unwrap();
        assert_eq!(ty.to_string(), "java.util.Map<String, int[]>[]");
        assert_eq!(cursor.peek_token(), Some(HostToken::Identifier("rest".into())));
    }
}
