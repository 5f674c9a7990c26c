//! Style resolution: kebab-case CSS properties with formula values become
//! camelCase properties with concrete values.

use column_format_expression::{evaluate, EvalCtx};
use indexmap::IndexMap;
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Evaluates every style value and renames the keys to camelCase.
pub fn resolve_style(style: &IndexMap<String, String>, ctx: &EvalCtx) -> IndexMap<String, String> {
    style
        .iter()
        .map(|(key, expr)| (camel_case(key), evaluate(expr, ctx)))
        .collect()
}

fn dash_letter() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-([a-z])").unwrap())
}

/// `background-color` -> `backgroundColor`.
pub fn camel_case(key: &str) -> String {
    dash_letter()
        .replace_all(key, |caps: &Captures<'_>| caps[1].to_ascii_uppercase())
        .into_owned()
}

/// `backgroundColor` -> `background-color`; the inverse of [`camel_case`]
/// for keys made of lowercase words.
pub fn kebab_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
