use crate::evaluate::Evaluator;
use crate::types::Expr;

/// `if(cond, then, otherwise)`: evaluates the condition, then exactly one
/// branch. The other branch is never visited.
pub(crate) fn if_eval(ev: &mut Evaluator<'_>, cond: &Expr, then: &Expr, otherwise: &Expr) -> String {
    if ev.condition(cond) {
        ev.value(then)
    } else {
        ev.value(otherwise)
    }
}
