use crate::error::Anomaly;
use crate::types::CompareOp;
use crate::util::to_number;

/// Compares two reduced operands.
///
/// `==` is string equality. `<=` and `>=` compare numerically and are false
/// when either side is not a number; the anomaly is returned alongside.
pub fn compare(op: CompareOp, left: &str, right: &str) -> (bool, Option<Anomaly>) {
    if op == CompareOp::Eq {
        return (left == right, None);
    }
    match (to_number(left), to_number(right)) {
        (Some(l), Some(r)) => {
            let result = match op {
                CompareOp::Le => l <= r,
                _ => l >= r,
            };
            (result, None)
        }
        _ => (
            false,
            Some(Anomaly::NonNumericOperand {
                op,
                left: left.to_owned(),
                right: right.to_owned(),
            }),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_textual() {
        assert_eq!(compare(CompareOp::Eq, "Done", "Done"), (true, None));
        assert_eq!(compare(CompareOp::Eq, "80", "80.0"), (false, None));
    }

    #[test]
    fn numeric() {
        assert_eq!(compare(CompareOp::Ge, "90", "80"), (true, None));
        assert_eq!(compare(CompareOp::Ge, "10", "80"), (false, None));
        assert_eq!(compare(CompareOp::Le, "80", "80"), (true, None));
        assert_eq!(compare(CompareOp::Le, "2024-01-01", "1800000000000"), (true, None));
    }

    #[test]
    fn non_numeric_is_false() {
        let (result, anomaly) = compare(CompareOp::Le, "abc", "1");
        assert!(!result);
        assert!(matches!(anomaly, Some(Anomaly::NonNumericOperand { .. })));
    }
}
