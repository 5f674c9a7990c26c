//! Recursive-descent parser producing [`Expr`].
//!
//! ```text
//! expr       := comparison
//! comparison := sum (("==" | "<=" | ">=") sum)?
//! sum        := primary ("+" primary)*
//! primary    := STRING | NUMBER | @currentField | @now
//!             | "if" "(" arg "," arg "," arg ("," arg)* ")"
//!             | "(" expr ")"
//! ```
//!
//! `if` arguments are found by splitting the token stream at top-level commas
//! before any of them is parsed, so a malformed argument never prevents its
//! siblings from being used. Arguments past the third are ignored.
//!
//! Groups and `if` calls nest at most [`MAX_DEPTH`] deep; anything deeper
//! becomes [`Expr::Invalid`] with [`ExprError::TooDeep`].

use crate::error::ExprError;
use crate::lexer::tokenize;
use crate::types::{CompareOp, Expr, Token, TokenKind};
use std::ops::Range;

/// Deepest nesting of parentheses and `if` calls accepted in one formula.
pub const MAX_DEPTH: usize = 128;

/// Parses a formula body (the text after `=`). Never fails.
pub fn parse(src: &str) -> Expr {
    match tokenize(src) {
        Ok(tokens) => parse_fragment(src, &tokens, 0),
        Err(error) => Expr::Invalid {
            raw: src.trim().to_owned(),
            error,
        },
    }
}

/// Parses a complete token slice, turning any failure into [`Expr::Invalid`].
fn parse_fragment(src: &str, tokens: &[Token], depth: usize) -> Expr {
    let mut parser = Parser {
        src,
        tokens,
        pos: 0,
        depth,
    };
    match parser.parse_complete() {
        Ok(expr) => expr,
        Err(error) => Expr::Invalid {
            raw: source_of(src, tokens).to_owned(),
            error,
        },
    }
}

fn source_of<'s>(src: &'s str, tokens: &[Token]) -> &'s str {
    match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => src[first.span.start..last.span.end].trim(),
        _ => "",
    }
}

struct Parser<'s, 't> {
    src: &'s str,
    tokens: &'t [Token],
    pos: usize,
    depth: usize,
}

impl<'s, 't> Parser<'s, 't> {
    fn parse_complete(&mut self) -> Result<Expr, ExprError> {
        if self.tokens.is_empty() {
            return Err(ExprError::EmptyExpression);
        }
        let expr = self.comparison()?;
        match self.peek() {
            None => Ok(expr),
            Some(token) => Err(unexpected(token)),
        }
    }

    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Result<&'t Token, ExprError> {
        let token = self.tokens.get(self.pos).ok_or(ExprError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(token)
    }

    fn descend(&mut self) -> Result<(), ExprError> {
        if self.depth >= MAX_DEPTH {
            return Err(ExprError::TooDeep { max: MAX_DEPTH });
        }
        self.depth += 1;
        Ok(())
    }

    fn comparison(&mut self) -> Result<Expr, ExprError> {
        let left = self.sum()?;
        let op = match self.peek().map(|t| &t.kind) {
            Some(TokenKind::EqEq) => CompareOp::Eq,
            Some(TokenKind::LtEq) => CompareOp::Le,
            Some(TokenKind::GtEq) => CompareOp::Ge,
            _ => return Ok(left),
        };
        self.pos += 1;
        let right = self.sum()?;
        Ok(Expr::Compare {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn sum(&mut self) -> Result<Expr, ExprError> {
        let mut operands = vec![self.primary()?];
        while matches!(self.peek().map(|t| &t.kind), Some(TokenKind::Plus)) {
            self.pos += 1;
            operands.push(self.primary()?);
        }
        if operands.len() == 1 {
            return Ok(operands.remove(0));
        }
        if operands.len() == 2 && operands.iter().all(Expr::is_integer_operand) {
            let right = operands.pop().map(Box::new);
            let left = operands.pop().map(Box::new);
            if let (Some(left), Some(right)) = (left, right) {
                return Ok(Expr::Add(left, right));
            }
        }
        Ok(Expr::Concat(operands))
    }

    fn primary(&mut self) -> Result<Expr, ExprError> {
        let token = self.next()?;
        match &token.kind {
            TokenKind::Str(s) => Ok(Expr::Str(s.clone())),
            TokenKind::Number(n) => Ok(Expr::Number(n.clone())),
            TokenKind::Field => Ok(Expr::Field),
            TokenKind::Now => Ok(Expr::Now),
            TokenKind::Var(name) => Err(ExprError::UnknownVariable {
                name: name.clone(),
                at: token.span.start,
            }),
            TokenKind::Ident(name) if name == "if" => self.if_call(),
            TokenKind::LParen => {
                let open = token.span.start;
                self.descend()?;
                let expr = self.comparison();
                self.depth -= 1;
                let expr = expr?;
                match self.next() {
                    Ok(Token {
                        kind: TokenKind::RParen,
                        ..
                    }) => Ok(expr),
                    Ok(other) => Err(unexpected(other)),
                    Err(_) => Err(ExprError::UnclosedParen { at: open }),
                }
            }
            _ => Err(unexpected(token)),
        }
    }

    fn if_call(&mut self) -> Result<Expr, ExprError> {
        let open = match self.next()? {
            Token {
                kind: TokenKind::LParen,
                span,
            } => span.start,
            other => return Err(unexpected(other)),
        };
        let (args, close) = split_args(self.tokens, self.pos).ok_or(ExprError::UnclosedParen { at: open })?;
        if args.len() < 3 {
            return Err(ExprError::IfArity { found: args.len() });
        }
        self.descend()?;
        self.pos = close + 1;
        let depth = self.depth;
        let mut parsed = args
            .into_iter()
            .take(3)
            .map(|range| Box::new(parse_fragment(self.src, &self.tokens[range], depth)));
        let expr = match (parsed.next(), parsed.next(), parsed.next()) {
            (Some(cond), Some(then), Some(otherwise)) => Ok(Expr::If {
                cond,
                then,
                otherwise,
            }),
            _ => Err(ExprError::IfArity { found: 0 }),
        };
        self.depth -= 1;
        expr
    }
}

/// Splits `tokens[from..]` at top-level commas up to the matching `)`.
///
/// Returns the argument ranges and the index of the closing parenthesis.
/// String literals are single tokens, so commas and parentheses inside them
/// never count. `if()` has no arguments; `if(,)` has two empty ones.
fn split_args(tokens: &[Token], from: usize) -> Option<(Vec<Range<usize>>, usize)> {
    let mut depth = 0usize;
    let mut args = Vec::new();
    let mut start = from;
    for (i, token) in tokens.iter().enumerate().skip(from) {
        match token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen if depth > 0 => depth -= 1,
            TokenKind::RParen => {
                if i > start || !args.is_empty() {
                    args.push(start..i);
                }
                return Some((args, i));
            }
            TokenKind::Comma if depth == 0 => {
                args.push(start..i);
                start = i + 1;
            }
            _ => {}
        }
    }
    None
}

fn unexpected(token: &Token) -> ExprError {
    let found = match &token.kind {
        TokenKind::Str(s) => format!("'{s}'"),
        TokenKind::Number(n) => n.clone(),
        TokenKind::Field => crate::FIELD_TOKEN.to_owned(),
        TokenKind::Now => crate::NOW_TOKEN.to_owned(),
        TokenKind::Var(name) => format!("@{name}"),
        TokenKind::Ident(name) => name.clone(),
        TokenKind::LParen => "(".to_owned(),
        TokenKind::RParen => ")".to_owned(),
        TokenKind::Comma => ",".to_owned(),
        TokenKind::Plus => "+".to_owned(),
        TokenKind::EqEq => "==".to_owned(),
        TokenKind::LtEq => "<=".to_owned(),
        TokenKind::GtEq => ">=".to_owned(),
        TokenKind::Unknown(c) => c.to_string(),
    };
    ExprError::UnexpectedToken {
        found,
        at: token.span.start,
    }
}
