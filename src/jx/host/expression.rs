//! Host expression tree
//!
//! The tree keeps what was written: literals stay as source text, parentheses are nodes of
//! their own and lambda block bodies are kept verbatim. `Display` prints the canonical form,
//! which reparses to the same tree.

use crate::jx::ast::elements::Markup;
use crate::jx::ast::range::Range;
use crate::jx::formats::source::markup_to_source;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub location: Range,
}

impl Expression {
    pub fn new(kind: ExpressionKind, location: Range) -> Self {
        Self { kind, location }
    }

    pub fn span(&self) -> std::ops::Range<usize> {
        self.location.span.clone()
    }

    pub fn is_markup(&self) -> bool {
        matches!(self.kind, ExpressionKind::Markup(_))
    }

    /// Markup values reachable from this expression, outermost first
    pub fn markup(&self) -> Vec<&Markup> {
        let mut found = Vec::new();
        self.collect_markup(&mut found);
        found
    }

    fn collect_markup<'a>(&'a self, found: &mut Vec<&'a Markup>) {
        match &self.kind {
            ExpressionKind::Markup(markup) => found.push(markup),
            ExpressionKind::Literal(_) | ExpressionKind::Name(_) | ExpressionKind::This => {}
            ExpressionKind::FieldAccess { object, .. } => object.collect_markup(found),
            ExpressionKind::MethodCall {
                receiver,
                arguments,
                ..
            } => {
                if let Some(receiver) = receiver {
                    receiver.collect_markup(found);
                }
                arguments.iter().for_each(|arg| arg.collect_markup(found));
            }
            ExpressionKind::ArrayAccess { array, index } => {
                array.collect_markup(found);
                index.collect_markup(found);
            }
            ExpressionKind::New { arguments, .. } => {
                arguments.iter().for_each(|arg| arg.collect_markup(found))
            }
            ExpressionKind::Unary { operand, .. }
            | ExpressionKind::Postfix { operand, .. }
            | ExpressionKind::InstanceOf { operand, .. }
            | ExpressionKind::Cast { operand, .. } => operand.collect_markup(found),
            ExpressionKind::Binary { left, right, .. } => {
                left.collect_markup(found);
                right.collect_markup(found);
            }
            ExpressionKind::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                condition.collect_markup(found);
                then_branch.collect_markup(found);
                else_branch.collect_markup(found);
            }
            ExpressionKind::Assignment { target, value, .. } => {
                target.collect_markup(found);
                value.collect_markup(found);
            }
            ExpressionKind::Parenthesized(inner) => inner.collect_markup(found),
            ExpressionKind::Lambda { body, .. } => {
                if let LambdaBody::Expression(body) = body {
                    body.collect_markup(found);
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    Integer(String),
    Float(String),
    /// Including the quotes, escapes untouched
    String(String),
    Char(String),
    Boolean(bool),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Not,
    Negate,
    Plus,
    BitNot,
    PreIncrement,
    PreDecrement,
}

impl UnaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOperator::Not => "!",
            UnaryOperator::Negate => "-",
            UnaryOperator::Plus => "+",
            UnaryOperator::BitNot => "~",
            UnaryOperator::PreIncrement => "++",
            UnaryOperator::PreDecrement => "--",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostfixOperator {
    Increment,
    Decrement,
}

impl PostfixOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            PostfixOperator::Increment => "++",
            PostfixOperator::Decrement => "--",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Shl,
    Shr,
    UShr,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Or => "||",
            BinaryOperator::And => "&&",
            BinaryOperator::BitOr => "|",
            BinaryOperator::BitXor => "^",
            BinaryOperator::BitAnd => "&",
            BinaryOperator::Eq => "==",
            BinaryOperator::Ne => "!=",
            BinaryOperator::Lt => "<",
            BinaryOperator::Gt => ">",
            BinaryOperator::Le => "<=",
            BinaryOperator::Ge => ">=",
            BinaryOperator::Shl => "<<",
            BinaryOperator::Shr => ">>",
            BinaryOperator::UShr => ">>>",
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Rem => "%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignmentOperator {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    UShr,
}

impl AssignmentOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            AssignmentOperator::Assign => "=",
            AssignmentOperator::Add => "+=",
            AssignmentOperator::Sub => "-=",
            AssignmentOperator::Mul => "*=",
            AssignmentOperator::Div => "/=",
            AssignmentOperator::Rem => "%=",
            AssignmentOperator::BitAnd => "&=",
            AssignmentOperator::BitOr => "|=",
            AssignmentOperator::BitXor => "^=",
            AssignmentOperator::Shl => "<<=",
            AssignmentOperator::Shr => ">>=",
            AssignmentOperator::UShr => ">>>=",
        }
    }
}

/// A type as written: `String`, `java.util.List<T>`, `int[]`, `?`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub name: String,
    pub arguments: Vec<TypeRef>,
    pub dimensions: usize,
}

impl TypeRef {
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            dimensions: 0,
        }
    }

    pub fn is_primitive(&self) -> bool {
        self.arguments.is_empty() && is_primitive_type(&self.name)
    }
}

pub fn is_primitive_type(name: &str) -> bool {
    matches!(
        name,
        "boolean" | "byte" | "char" | "short" | "int" | "long" | "float" | "double"
    )
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.arguments.is_empty() {
            f.write_str("<")?;
            write_separated(f, &self.arguments)?;
            f.write_str(">")?;
        }
        for _ in 0..self.dimensions {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LambdaParameter {
    pub ty: Option<TypeRef>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LambdaBody {
    Expression(Box<Expression>),
    /// `{ ... }` kept verbatim, braces included
    Block(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExpressionKind {
    Literal(Literal),
    Name(String),
    This,
    FieldAccess {
        object: Box<Expression>,
        field: String,
    },
    MethodCall {
        receiver: Option<Box<Expression>>,
        type_arguments: Vec<TypeRef>,
        name: String,
        arguments: Vec<Expression>,
    },
    ArrayAccess {
        array: Box<Expression>,
        index: Box<Expression>,
    },
    New {
        ty: TypeRef,
        arguments: Vec<Expression>,
    },
    Unary {
        op: UnaryOperator,
        operand: Box<Expression>,
    },
    Postfix {
        op: PostfixOperator,
        operand: Box<Expression>,
    },
    Binary {
        op: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    InstanceOf {
        operand: Box<Expression>,
        ty: TypeRef,
    },
    Conditional {
        condition: Box<Expression>,
        then_branch: Box<Expression>,
        else_branch: Box<Expression>,
    },
    Assignment {
        op: AssignmentOperator,
        target: Box<Expression>,
        value: Box<Expression>,
    },
    Cast {
        ty: TypeRef,
        operand: Box<Expression>,
    },
    Parenthesized(Box<Expression>),
    Lambda {
        parameters: Vec<LambdaParameter>,
        /// `(x) -> ...` versus `x -> ...`
        parenthesized: bool,
        body: LambdaBody,
    },
    Markup(Box<Markup>),
}

fn write_separated<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(text)
            | Literal::Float(text)
            | Literal::String(text)
            | Literal::Char(text) => f.write_str(text),
            Literal::Boolean(value) => write!(f, "{}", value),
            Literal::Null => f.write_str("null"),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExpressionKind::Literal(literal) => write!(f, "{}", literal),
            ExpressionKind::Name(name) => f.write_str(name),
            ExpressionKind::This => f.write_str("this"),
            ExpressionKind::FieldAccess { object, field } => write!(f, "{}.{}", object, field),
            ExpressionKind::MethodCall {
                receiver,
                type_arguments,
                name,
                arguments,
            } => {
                if let Some(receiver) = receiver {
                    write!(f, "{}.", receiver)?;
                }
                if !type_arguments.is_empty() {
                    f.write_str("<")?;
                    write_separated(f, type_arguments)?;
                    f.write_str(">")?;
                }
                write!(f, "{}(", name)?;
                write_separated(f, arguments)?;
                f.write_str(")")
            }
            ExpressionKind::ArrayAccess { array, index } => write!(f, "{}[{}]", array, index),
            ExpressionKind::New { ty, arguments } => {
                write!(f, "new {}(", ty)?;
                write_separated(f, arguments)?;
                f.write_str(")")
            }
            ExpressionKind::Unary { op, operand } => write!(f, "{}{}", op.symbol(), operand),
            ExpressionKind::Postfix { op, operand } => write!(f, "{}{}", operand, op.symbol()),
            ExpressionKind::Binary { op, left, right } => {
                write!(f, "{} {} {}", left, op.symbol(), right)
            }
            ExpressionKind::InstanceOf { operand, ty } => {
                write!(f, "{} instanceof {}", operand, ty)
            }
            ExpressionKind::Conditional {
                condition,
                then_branch,
                else_branch,
            } => write!(f, "{} ? {} : {}", condition, then_branch, else_branch),
            ExpressionKind::Assignment { op, target, value } => {
                write!(f, "{} {} {}", target, op.symbol(), value)
            }
            ExpressionKind::Cast { ty, operand } => write!(f, "({}) {}", ty, operand),
            ExpressionKind::Parenthesized(inner) => write!(f, "({})", inner),
            ExpressionKind::Lambda {
                parameters,
                parenthesized,
                body,
            } => {
                if *parenthesized {
                    f.write_str("(")?;
                    for (idx, param) in parameters.iter().enumerate() {
                        if idx > 0 {
                            f.write_str(", ")?;
                        }
                        if let Some(ty) = &param.ty {
                            write!(f, "{} ", ty)?;
                        }
                        f.write_str(&param.name)?;
                    }
                    f.write_str(")")?;
                } else if let Some(param) = parameters.first() {
                    f.write_str(&param.name)?;
                }
                f.write_str(" -> ")?;
                match body {
                    LambdaBody::Expression(body) => write!(f, "{}", body),
                    LambdaBody::Block(block) => f.write_str(block),
                }
            }
            ExpressionKind::Markup(markup) => f.write_str(&markup_to_source(markup)),
        }
    }
}
