use crate::error::ExprError;
use std::fmt;
use std::ops::Range;

/// Lexical token kinds of the formula language.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Quoted string, quotes removed.
    Str(String),
    /// Decimal number as written (`80`, `-1`, `0.5`).
    Number(String),
    /// `@currentField`
    Field,
    /// `@now`
    Now,
    /// Any other `@name`.
    Var(String),
    /// Bare word such as `if`.
    Ident(String),
    LParen,
    RParen,
    Comma,
    Plus,
    EqEq,
    LtEq,
    GtEq,
    /// A character the language has no use for.
    Unknown(char),
}

/// A token and the byte range of the source it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// String equality.
    Eq,
    /// Numeric `<=`.
    Le,
    /// Numeric `>=`.
    Ge,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CompareOp::Eq => "==",
            CompareOp::Le => "<=",
            CompareOp::Ge => ">=",
        })
    }
}

/// Parsed formula.
///
/// Parsing never fails as a whole: a fragment that cannot be parsed becomes
/// [`Expr::Invalid`], which evaluates to its own source text. Each argument
/// of an `if` is parsed on its own, so a malformed branch only surfaces if
/// that branch is taken.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Str(String),
    Number(String),
    Field,
    Now,
    /// Two or more operands joined by `+`, reduced to strings and joined.
    Concat(Vec<Expr>),
    /// Exactly two integer operands joined by `+`, added as integers.
    Add(Box<Expr>, Box<Expr>),
    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    If {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    Invalid {
        raw: String,
        error: ExprError,
    },
}

impl Expr {
    /// Whether this operand takes part in integer addition.
    pub fn is_integer_operand(&self) -> bool {
        match self {
            Expr::Now => true,
            Expr::Number(raw) => {
                let digits = raw.strip_prefix('-').unwrap_or(raw);
                !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
            }
            _ => false,
        }
    }
}
