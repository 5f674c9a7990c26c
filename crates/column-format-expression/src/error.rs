use crate::types::CompareOp;
use thiserror::Error;

/// Reasons a formula fragment could not be parsed.
///
/// Offsets are byte offsets into the formula body (the text after `=`).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    #[error("unterminated string literal starting at {at}")]
    UnterminatedString { at: usize },

    #[error("unexpected {found:?} at {at}")]
    UnexpectedToken { found: String, at: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unclosed parenthesis at {at}")]
    UnclosedParen { at: usize },

    #[error("\"if\" expects at least 3 arguments, found {found}")]
    IfArity { found: usize },

    #[error("unknown variable {name:?} at {at}")]
    UnknownVariable { name: String, at: usize },

    #[error("empty expression")]
    EmptyExpression,

    #[error("expression nests deeper than {max} levels")]
    TooDeep { max: usize },
}

/// Something that went wrong while evaluating, recovered from locally.
///
/// The evaluator never fails; it records these and keeps going with the
/// most reasonable partial value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Anomaly {
    #[error("malformed expression {fragment:?}: {error}")]
    Malformed { fragment: String, error: ExprError },

    #[error("{op} needs numeric operands, got {left:?} and {right:?}")]
    NonNumericOperand {
        op: CompareOp,
        left: String,
        right: String,
    },

    #[error("condition is not a comparison")]
    NonComparisonCondition,

    #[error("{left} + {right} does not fit a 64-bit integer")]
    ArithmeticOverflow { left: String, right: String },
}
