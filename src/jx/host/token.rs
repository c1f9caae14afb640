//! Host-language tokens
//!
//! A single logos lexer covers the Java subset used in module headers and embedded
//! expressions. Whitespace and both comment forms are skipped by logos itself.
//!
//! `>` is always lexed alone (plus `>=`): the parser rebuilds `>>`, `>>>`, `>>=` and `>>>=`
//! from adjacent tokens, so nested type arguments such as `List<List<String>>` close
//! without splitting a shift token.

use logos::Logos;

#[derive(Logos, Debug, Clone, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*([^*]|\*+[^*/])*\*+/")]
pub enum HostToken {
    // Keywords
    #[token("package")]
    Package,
    #[token("import")]
    Import,
    #[token("static")]
    Static,
    #[token("final")]
    Final,
    #[token("new")]
    New,
    #[token("this")]
    This,
    #[token("instanceof")]
    InstanceOf,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // Literals, kept as written
    #[regex(r"[0-9][0-9_]*[lL]?", |lex| lex.slice().to_string())]
    #[regex(r"0[xX][0-9a-fA-F_]+[lL]?", |lex| lex.slice().to_string())]
    IntegerLiteral(String),
    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?[fFdD]?", |lex| lex.slice().to_string())]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+[fFdD]?", |lex| lex.slice().to_string())]
    #[regex(r"[0-9]+[fFdD]", |lex| lex.slice().to_string())]
    FloatLiteral(String),
    #[regex(r#""([^"\\\n]|\\.)*""#, |lex| lex.slice().to_string())]
    StringLiteral(String),
    #[regex(r"'([^'\\\n]|\\.)+'", |lex| lex.slice().to_string())]
    CharLiteral(String),

    // Delimiters
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("...")]
    Ellipsis,
    #[token("::")]
    ColonColon,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,
    #[token("->")]
    Arrow,

    // Operators
    #[token("=")]
    Assign,
    #[token("+=")]
    PlusAssign,
    #[token("-=")]
    MinusAssign,
    #[token("*=")]
    StarAssign,
    #[token("/=")]
    SlashAssign,
    #[token("%=")]
    PercentAssign,
    #[token("&=")]
    AmpAssign,
    #[token("|=")]
    PipeAssign,
    #[token("^=")]
    CaretAssign,
    #[token("<<=")]
    ShlAssign,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("!")]
    Bang,
    #[token("~")]
    Tilde,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("<<")]
    Shl,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
}

impl HostToken {
    /// Tokens that can begin an operand without being a binary operator
    pub fn starts_operand(&self) -> bool {
        matches!(
            self,
            HostToken::Identifier(_)
                | HostToken::IntegerLiteral(_)
                | HostToken::FloatLiteral(_)
                | HostToken::StringLiteral(_)
                | HostToken::CharLiteral(_)
                | HostToken::True
                | HostToken::False
                | HostToken::Null
                | HostToken::This
                | HostToken::New
                | HostToken::LParen
                | HostToken::Bang
                | HostToken::Tilde
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<HostToken> {
        HostToken::lexer(source).filter_map(Result::ok).collect()
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            lex("new Foo this newer"),
            vec![
                HostToken::New,
                HostToken::Identifier("Foo".into()),
                HostToken::This,
                HostToken::Identifier("newer".into()),
            ]
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(
            lex(r#"42 3.5f 0xFF "a\"b" 'c'"#),
            vec![
                HostToken::IntegerLiteral("42".into()),
                HostToken::FloatLiteral("3.5f".into()),
                HostToken::IntegerLiteral("0xFF".into()),
                HostToken::StringLiteral(r#""a\"b""#.into()),
                HostToken::CharLiteral("'c'".into()),
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            lex("a // line\n /* block * */ b"),
            vec![
                HostToken::Identifier("a".into()),
                HostToken::Identifier("b".into()),
            ]
        );
    }

    #[test]
    fn test_closing_angles_stay_single() {
        assert_eq!(
            lex("a >> b"),
            vec![
                HostToken::Identifier("a".into()),
                HostToken::Gt,
                HostToken::Gt,
                HostToken::Identifier("b".into()),
            ]
        );
    }

    #[test]
    fn test_arrow_and_ellipsis() {
        assert_eq!(
            lex("...x -> y"),
            vec![
                HostToken::Ellipsis,
                HostToken::Identifier("x".into()),
                HostToken::Arrow,
                HostToken::Identifier("y".into()),
            ]
        );
    }
}
