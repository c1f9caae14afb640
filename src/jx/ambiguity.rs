//! Ambiguity resolution
//!
//!     Markup and host expressions share `<`, `>`, `{` and `}`. Wherever both readings are
//!     locally possible, the parser asks an [AmbiguityTable] which production wins instead of
//!     deciding ad hoc. The table is a plain immutable value: [AmbiguityTable::standard] builds
//!     it once per process and every parse call borrows it.
//!
//!     A rule either prefers one production outright, or defers. Deferring means both readings
//!     stay valid as far as syntax can tell; the parser builds the default reading and reports
//!     a `deferred-ambiguity` hint so a later semantic pass can revisit it.
//!
//!     The same table carries host operator precedence and associativity, so the precedence
//!     climbing in the host grammar and the markup conflict rules come from one place.

use once_cell::sync::Lazy;
use std::fmt;

/// Productions that compete for the same input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Production {
    /// `<` starting an element or fragment
    MarkupOpen,
    /// `<` as the relational operator
    LessThan,
    /// `<` opening generic type arguments
    TypeArguments,
    PrimaryExpression,
    Lambda,
    Parenthesized,
    Cast,
    Binary,
    /// `{` in markup content
    EmbeddedExpression,
    /// `{` opening a host block
    Block,
    /// `>` closing a start tag
    TagEnd,
    /// `>` as the relational operator
    GreaterThan,
    TextRun,
    ModuleName,
    MethodInvocation,
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Production::MarkupOpen => "markup open",
            Production::LessThan => "less-than",
            Production::TypeArguments => "type arguments",
            Production::PrimaryExpression => "primary expression",
            Production::Lambda => "lambda",
            Production::Parenthesized => "parenthesized expression",
            Production::Cast => "cast",
            Production::Binary => "binary expression",
            Production::EmbeddedExpression => "embedded expression",
            Production::Block => "block",
            Production::TagEnd => "tag end",
            Production::GreaterThan => "greater-than",
            Production::TextRun => "text run",
            Production::ModuleName => "module name",
            Production::MethodInvocation => "method invocation",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    Prefer(Production),
    /// Both readings are valid; build `default` and flag the site
    Defer { default: Production },
    /// A production conflicting with itself: group by associativity
    Associate(Associativity),
}

impl Resolution {
    /// The production the parser builds
    pub fn chosen(&self, fallback: Production) -> Production {
        match self {
            Resolution::Prefer(production) | Resolution::Defer { default: production } => {
                *production
            }
            Resolution::Associate(_) => fallback,
        }
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Resolution::Defer { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictRule {
    pub first: Production,
    pub second: Production,
    pub resolution: Resolution,
    /// Where the conflict shows up, for listings and diagnostics
    pub context: &'static str,
}

impl ConflictRule {
    fn covers(&self, a: Production, b: Production) -> bool {
        (self.first == a && self.second == b) || (self.first == b && self.second == a)
    }
}

/// Binding power of one host operator; larger binds tighter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorRule {
    pub symbol: &'static str,
    pub precedence: u8,
    pub associativity: Associativity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguityTable {
    conflicts: Vec<ConflictRule>,
    operators: Vec<OperatorRule>,
}

static STANDARD: Lazy<AmbiguityTable> = Lazy::new(AmbiguityTable::build_standard);

impl AmbiguityTable {
    pub fn new(conflicts: Vec<ConflictRule>, operators: Vec<OperatorRule>) -> Self {
        Self {
            conflicts,
            operators,
        }
    }

    /// The process-wide table
    pub fn standard() -> &'static AmbiguityTable {
        &STANDARD
    }

    fn build_standard() -> Self {
        use Production::*;

        let rule = |first, second, resolution, context| ConflictRule {
            first,
            second,
            resolution,
            context,
        };
        let conflicts = vec![
            rule(
                MarkupOpen,
                TypeArguments,
                Resolution::Prefer(MarkupOpen),
                "`<` in operand position",
            ),
            rule(
                MarkupOpen,
                LessThan,
                Resolution::Prefer(LessThan),
                "`<` after a complete operand",
            ),
            rule(
                LessThan,
                TypeArguments,
                Resolution::Prefer(LessThan),
                "`<` in operator position",
            ),
            rule(
                Lambda,
                Parenthesized,
                Resolution::Prefer(Lambda),
                "`( ... )` followed by `->`",
            ),
            rule(
                Lambda,
                PrimaryExpression,
                Resolution::Prefer(Lambda),
                "identifier followed by `->`",
            ),
            rule(
                Cast,
                Binary,
                Resolution::Defer { default: Binary },
                "`(Name)` followed by `+` or `-`",
            ),
            rule(
                Cast,
                Parenthesized,
                Resolution::Prefer(Cast),
                "`(Type)` followed by an operand",
            ),
            rule(
                EmbeddedExpression,
                Block,
                Resolution::Prefer(EmbeddedExpression),
                "`{` in markup content",
            ),
            rule(
                TagEnd,
                GreaterThan,
                Resolution::Prefer(TagEnd),
                "`>` inside a start tag",
            ),
            rule(
                TextRun,
                TextRun,
                Resolution::Associate(Associativity::Left),
                "adjacent character data",
            ),
            rule(
                ModuleName,
                MethodInvocation,
                Resolution::Prefer(ModuleName),
                "`Name(` at top level",
            ),
        ];

        let op = |symbol, precedence, associativity| OperatorRule {
            symbol,
            precedence,
            associativity,
        };
        let mut operators = Vec::new();
        for symbol in [
            "=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<=", ">>=", ">>>=",
        ] {
            operators.push(op(symbol, 1, Associativity::Right));
        }
        operators.push(op("?", 2, Associativity::Right));
        operators.push(op("||", 3, Associativity::Left));
        operators.push(op("&&", 4, Associativity::Left));
        operators.push(op("|", 5, Associativity::Left));
        operators.push(op("^", 6, Associativity::Left));
        operators.push(op("&", 7, Associativity::Left));
        for symbol in ["==", "!="] {
            operators.push(op(symbol, 8, Associativity::Left));
        }
        for symbol in ["<", ">", "<=", ">=", "instanceof"] {
            operators.push(op(symbol, 9, Associativity::Left));
        }
        for symbol in ["<<", ">>", ">>>"] {
            operators.push(op(symbol, 10, Associativity::Left));
        }
        for symbol in ["+", "-"] {
            operators.push(op(symbol, 11, Associativity::Left));
        }
        for symbol in ["*", "/", "%"] {
            operators.push(op(symbol, 12, Associativity::Left));
        }

        Self::new(conflicts, operators)
    }

    /// Resolution for a pair of competing productions, in either order
    pub fn resolve(&self, a: Production, b: Production) -> Option<Resolution> {
        self.rule(a, b).map(|rule| rule.resolution)
    }

    pub fn rule(&self, a: Production, b: Production) -> Option<&ConflictRule> {
        self.conflicts.iter().find(|rule| rule.covers(a, b))
    }

    /// Whether `candidate` wins against `other`; pairs with no rule keep `other`
    pub fn prefers(&self, candidate: Production, other: Production) -> bool {
        self.resolve(candidate, other)
            .map(|resolution| resolution.chosen(other) == candidate)
            .unwrap_or(false)
    }

    pub fn operator(&self, symbol: &str) -> Option<&OperatorRule> {
        self.operators.iter().find(|rule| rule.symbol == symbol)
    }

    pub fn conflicts(&self) -> &[ConflictRule] {
        &self.conflicts
    }

    pub fn operators(&self) -> &[OperatorRule] {
        &self.operators
    }
}
