//! Integration tests for formula evaluation.

use column_format_expression::{evaluate, evaluate_with_report, Anomaly, EvalCtx, ExprError};
use proptest::prelude::*;

const NOW: i64 = 1_767_225_600_000;
const WEEK: i64 = 604_800_000;
const DAY: i64 = 86_400_000;

fn check(expression: &str, field: &str, expected: &str) {
    let ctx = EvalCtx::new(field, NOW);
    let result = evaluate_with_report(expression, &ctx);
    assert_eq!(result.value, expected, "expression: {expression} field: {field}");
    assert!(
        result.anomalies.is_empty(),
        "expression: {expression} anomalies: {:?}",
        result.anomalies
    );
}

fn check_degraded(expression: &str, field: &str, expected: &str) -> Vec<Anomaly> {
    let ctx = EvalCtx::new(field, NOW);
    let result = evaluate_with_report(expression, &ctx);
    assert_eq!(result.value, expected, "expression: {expression}");
    assert!(!result.anomalies.is_empty(), "expected anomalies for {expression}");
    result.anomalies
}

// ----------------------------------------------------------------- Literals

#[test]
fn test_literal_passthrough() {
    check("@currentField", "Blocked", "Blocked");
    check("[@currentField] (@currentField)", "x", "[x] (x)");
    check("plain text", "x", "plain text");
    check("", "x", "");
}

#[test]
fn test_literal_does_not_parse_formulas() {
    check("if(@currentField == 'a', 'b', 'c')", "a", "if(a == 'a', 'b', 'c')");
    check("@now", "x", "@now");
}

#[test]
fn test_quoted_strings() {
    check("='hello'", "x", "hello");
    check("=\"double\"", "x", "double");
    check("=  'padded'  ", "x", "padded");
    check("='@currentField'", "x", "@currentField");
}

#[test]
fn test_field_and_now() {
    check("=@currentField", "42", "42");
    check("=@now", "x", &NOW.to_string());
    check("=80", "x", "80");
}

// ----------------------------------------------------------------- Concatenation

#[test]
fn test_concat() {
    check("=@currentField + '%'", "42", "42%");
    check("='a' + @currentField + 'c'", "b", "abc");
    check("='a'+'b'", "x", "ab");
    check("=@currentField + 1", "5", "51");
    check("=1 + 2 + 3", "x", "123");
}

#[test]
fn test_integer_addition() {
    check("=1 + 2", "x", "3");
    check("=@now + 604800000", "x", &(NOW + WEEK).to_string());
}

#[test]
fn test_addition_overflow_concatenates() {
    let anomalies = check_degraded("=9223372036854775807 + 1", "x", "92233720368547758071");
    assert!(matches!(anomalies[0], Anomaly::ArithmeticOverflow { .. }));
}

// ----------------------------------------------------------------- Branching

#[test]
fn test_if_short_circuit() {
    check("=if('a' == 'a', 'T', if('broken'))", "x", "T");
    check("=if('a' == 'a', 'T', 'x' ~ 'y')", "x", "T");
    check("=if('a' == 'b', 'x' ~ 'y', 'F')", "x", "F");
}

#[test]
fn test_if_taken_malformed_branch_degrades() {
    let anomalies = check_degraded("=if('a' == 'b', 'T', if('broken'))", "x", "if('broken')");
    assert_eq!(anomalies.len(), 1);
}

#[test]
fn test_if_nesting() {
    let expr = "=if(@currentField == 'Done', '✅', if(@currentField == 'Blocked', '🚫', '⬜'))";
    check(expr, "Done", "✅");
    check(expr, "Blocked", "🚫");
    check(expr, "Other", "⬜");
}

#[test]
fn test_if_deep_nesting() {
    let mut expr = String::from("'end'");
    for i in (0..20).rev() {
        expr = format!("if(@currentField == '{i}', 'v{i}', {expr})");
    }
    let expr = format!("={expr}");
    check(&expr, "0", "v0");
    check(&expr, "19", "v19");
    check(&expr, "nope", "end");
}

#[test]
fn test_if_extra_arguments_ignored() {
    check("=if(@currentField == 'a', 'x', 'y', 'z')", "a", "x");
    check("=if(@currentField == 'a', 'x', 'y', 'z')", "b", "y");
}

#[test]
fn test_if_argument_splitting() {
    check("=if('a,b' == 'a,b', 'x, (y)', 'z')", "x", "x, (y)");
    check("=if((@currentField == 'a'), ('b'), 'c')", "a", "b");
    check("=if(@currentField == 'a', if('1' == '1', 'p, q', 'r'), 's')", "a", "p, q");
}

// ----------------------------------------------------------------- Comparisons

#[test]
fn test_numeric_thresholds() {
    let expr = "=if(@currentField >= 80, 'green', if(@currentField >= 50, 'yellow', 'red'))";
    check(expr, "90", "green");
    check(expr, "60", "yellow");
    check(expr, "10", "red");
    check(expr, "80", "green");
}

#[test]
fn test_numeric_comparison_with_non_number_is_false() {
    let anomalies = check_degraded("=if(@currentField >= 50, 'big', 'small')", "lots", "small");
    assert!(matches!(anomalies[0], Anomaly::NonNumericOperand { .. }));
}

#[test]
fn test_now_window() {
    let expr = "=if(@currentField <= @now, 'A', if(@currentField <= @now + 604800000, 'B', 'C'))";
    check(expr, &(NOW - 1).to_string(), "A");
    check(expr, &(NOW + 3 * DAY).to_string(), "B");
    check(expr, &(NOW + 30 * DAY).to_string(), "C");
}

#[test]
fn test_now_window_with_dates() {
    let expr = "=if(@currentField <= @now, 'overdue', if(@currentField <= @now + 604800000, 'soon', 'later'))";
    // NOW is 2026-01-01T00:00:00Z
    check(expr, "2025-06-15", "overdue");
    check(expr, "2026-01-05", "soon");
    check(expr, "2026-12-31", "later");
}

// ----------------------------------------------------------------- Degradation

#[test]
fn test_malformed_returns_trimmed_source() {
    check_degraded("=if(1, 2)", "x", "if(1, 2)");
    check_degraded("=  Done  ", "x", "Done");
    check_degraded("=@currentField ~ 'x'", "v", "v ~ 'x'");
    check_degraded("=if(@now <= 1", "x", &format!("if({NOW} <= 1"));
    check_degraded("='unterminated", "x", "'unterminated");
    check_degraded("=", "x", "");
    check_degraded("=@me", "x", "@me");
}

#[test]
fn test_very_deep_nesting_degrades() {
    let mut expr = String::from("'end'");
    for _ in 0..10_000 {
        expr = format!("if(@currentField == 'i', 'v', {expr})");
    }
    let expr = format!("={expr}");
    check(&expr, "i", "v");
    let ctx = EvalCtx::new("other", NOW);
    let result = evaluate_with_report(&expr, &ctx);
    assert!(result.value.starts_with("if(other == 'i', 'v', "));
    assert!(matches!(
        result.anomalies.as_slice(),
        [Anomaly::Malformed { error: ExprError::TooDeep { .. }, .. }]
    ));

    let body = format!("{}'x'{}", "(".repeat(10_000), ")".repeat(10_000));
    let anomalies = check_degraded(&format!("={body}"), "x", &body);
    assert!(matches!(
        anomalies.as_slice(),
        [Anomaly::Malformed { error: ExprError::TooDeep { .. }, .. }]
    ));
}

#[test]
fn test_error_offsets_count_leading_whitespace() {
    let anomalies = check_degraded("=  if(", "x", "if(");
    assert_eq!(
        anomalies,
        vec![Anomaly::Malformed {
            fragment: "if(".into(),
            error: ExprError::UnclosedParen { at: 4 },
        }]
    );
}

proptest! {
    #[test]
    fn evaluate_is_total(expr in "=?[ -~]{0,40}", field in "[ -~]{0,10}") {
        let ctx = EvalCtx::new(field, NOW);
        let _ = evaluate(&expr, &ctx);
    }

    #[test]
    fn evaluate_is_deterministic(expr in "=[()',+=<>@a-z0-9 ]{0,30}", field in "[a-z0-9]{0,5}") {
        let ctx = EvalCtx::new(field, NOW);
        prop_assert_eq!(evaluate(&expr, &ctx), evaluate(&expr, &ctx));
    }
}
