//! Coercion and substitution helpers.

use crate::eval_ctx::EvalCtx;
use crate::{FIELD_TOKEN, NOW_TOKEN};
use chrono::{DateTime, NaiveDate};

/// Replaces every `@currentField` with the field value. No escaping.
pub fn substitute_field(text: &str, field_value: &str) -> String {
    text.replace(FIELD_TOKEN, field_value)
}

/// Replaces `@now` and `@currentField` textually.
///
/// Used for the fallback text of fragments that could not be parsed.
/// `@now` goes first so a field value containing `@now` is left as is.
pub fn substitute_tokens(text: &str, ctx: &EvalCtx) -> String {
    let with_now = text.replace(NOW_TOKEN, &ctx.now_millis.to_string());
    substitute_field(&with_now, &ctx.field_value)
}

/// Reads a reduced value as a number for `<=` / `>=`.
///
/// Accepts a decimal number, an RFC 3339 timestamp or a `YYYY-MM-DD` date
/// (UTC midnight); dates become epoch milliseconds so they compare against
/// `@now`.
pub fn to_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(n) = trimmed.parse::<f64>() {
        return n.is_finite().then_some(n);
    }
    date_millis(trimmed).map(|ms| ms as f64)
}

/// Parses an ISO-8601 date or timestamp to epoch milliseconds.
pub fn date_millis(value: &str) -> Option<i64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp_millis());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers() {
        assert_eq!(to_number("80"), Some(80.0));
        assert_eq!(to_number(" 0.5 "), Some(0.5));
        assert_eq!(to_number("-3"), Some(-3.0));
        assert_eq!(to_number(""), None);
        assert_eq!(to_number("abc"), None);
        assert_eq!(to_number("NaN"), None);
        assert_eq!(to_number("inf"), None);
    }

    #[test]
    fn dates() {
        assert_eq!(date_millis("1970-01-02"), Some(86_400_000));
        assert_eq!(date_millis("1970-01-01T00:00:01Z"), Some(1_000));
        assert_eq!(to_number("2024-01-01"), Some(1_704_067_200_000.0));
        assert_eq!(date_millis("2024-13-01"), None);
    }

    #[test]
    fn substitution_order() {
        let ctx = EvalCtx::new("@now", 5);
        assert_eq!(substitute_tokens("@currentField/@now", &ctx), "@now/5");
        assert_eq!(substitute_field("a @currentField b @currentField", "x"), "a x b x");
    }
}
