//! Tokenizer for formula bodies.

use crate::error::ExprError;
use crate::types::{Token, TokenKind};
use std::iter::Peekable;
use std::str::CharIndices;

/// Splits a formula body into tokens.
///
/// Only an unterminated string literal is fatal: it leaves the rest of the
/// input without a well-defined structure. Characters the language does not
/// know become [`TokenKind::Unknown`] and are rejected by the parser, which
/// keeps the failure local to the fragment containing them.
pub fn tokenize(src: &str) -> Result<Vec<Token>, ExprError> {
    let mut tokens = Vec::new();
    let mut chars = src.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }
        let kind = match ch {
            '\'' | '"' => lex_string(&mut chars, src)?,
            '0'..='9' => lex_number(&mut chars, src),
            '-' if next_is_digit(src, start) => lex_number(&mut chars, src),
            '@' => {
                chars.next();
                let name = take_word(&mut chars, src);
                match name {
                    "currentField" => TokenKind::Field,
                    "now" => TokenKind::Now,
                    other => TokenKind::Var(other.to_owned()),
                }
            }
            c if c.is_alphabetic() || c == '_' => {
                TokenKind::Ident(take_word(&mut chars, src).to_owned())
            }
            '(' => single(&mut chars, TokenKind::LParen),
            ')' => single(&mut chars, TokenKind::RParen),
            ',' => single(&mut chars, TokenKind::Comma),
            '+' => single(&mut chars, TokenKind::Plus),
            '=' | '<' | '>' => {
                chars.next();
                match chars.peek() {
                    Some(&(_, '=')) => {
                        chars.next();
                        match ch {
                            '=' => TokenKind::EqEq,
                            '<' => TokenKind::LtEq,
                            _ => TokenKind::GtEq,
                        }
                    }
                    _ => TokenKind::Unknown(ch),
                }
            }
            other => single(&mut chars, TokenKind::Unknown(other)),
        };
        let end = chars.peek().map(|&(i, _)| i).unwrap_or(src.len());
        tokens.push(Token {
            kind,
            span: start..end,
        });
    }

    Ok(tokens)
}

fn single(chars: &mut Peekable<CharIndices<'_>>, kind: TokenKind) -> TokenKind {
    chars.next();
    kind
}

fn next_is_digit(src: &str, at: usize) -> bool {
    src[at + 1..].starts_with(|c: char| c.is_ascii_digit())
}

fn lex_string(chars: &mut Peekable<CharIndices<'_>>, src: &str) -> Result<TokenKind, ExprError> {
    let (start, quote) = chars.next().ok_or(ExprError::UnexpectedEnd)?;
    let body_start = start + quote.len_utf8();
    for (i, c) in chars.by_ref() {
        if c == quote {
            return Ok(TokenKind::Str(src[body_start..i].to_owned()));
        }
    }
    Err(ExprError::UnterminatedString { at: start })
}

fn lex_number(chars: &mut Peekable<CharIndices<'_>>, src: &str) -> TokenKind {
    let start = chars.peek().map(|&(i, _)| i).unwrap_or(src.len());
    let mut end = start;
    let mut seen_dot = false;
    let mut first = true;
    while let Some(&(i, c)) = chars.peek() {
        let accept = c.is_ascii_digit()
            || (first && c == '-')
            || (c == '.' && !seen_dot && src[i + 1..].starts_with(|d: char| d.is_ascii_digit()));
        if !accept {
            break;
        }
        seen_dot |= c == '.';
        first = false;
        end = i + c.len_utf8();
        chars.next();
    }
    TokenKind::Number(src[start..end].to_owned())
}

fn take_word<'s>(chars: &mut Peekable<CharIndices<'_>>, src: &'s str) -> &'s str {
    let start = chars.peek().map(|&(i, _)| i).unwrap_or(src.len());
    let mut end = start;
    while let Some(&(i, c)) = chars.peek() {
        if !(c.is_alphanumeric() || c == '_') {
            break;
        }
        end = i + c.len_utf8();
        chars.next();
    }
    &src[start..end]
}
