use crate::error::Anomaly;

/// Adds two integer operands.
///
/// Operands are reduced strings of integer literals or `@now`. When either
/// operand or the sum does not fit an `i64` the caller falls back to
/// concatenation.
pub fn add(left: &str, right: &str) -> Result<String, Anomaly> {
    let sum = match (left.parse::<i64>(), right.parse::<i64>()) {
        (Ok(l), Ok(r)) => l.checked_add(r),
        _ => None,
    };
    sum.map(|n| n.to_string())
        .ok_or_else(|| Anomaly::ArithmeticOverflow {
            left: left.to_owned(),
            right: right.to_owned(),
        })
}
