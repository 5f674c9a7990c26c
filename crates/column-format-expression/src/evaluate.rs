//! The `evaluate` entry points and the AST visitor behind them.

use crate::error::Anomaly;
use crate::eval_ctx::EvalCtx;
use crate::operators::{arithmetic, branching, comparison, string};
use crate::parser::parse;
use crate::types::Expr;
use crate::util;
use log::debug;

/// Result of [`evaluate_with_report`].
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub value: String,
    /// Anomalies met on the evaluated path, in evaluation order.
    pub anomalies: Vec<Anomaly>,
}

/// Evaluates a style, attribute or text value against `ctx`.
///
/// - Without a leading `=` the value is a literal template: every
///   `@currentField` is replaced by the field value.
/// - With a leading `=` the rest is a formula, parsed and evaluated.
///
/// Never fails. Malformed formulas evaluate to their own text.
pub fn evaluate(expr: &str, ctx: &EvalCtx) -> String {
    evaluate_with_report(expr, ctx).value
}

/// Same as [`evaluate`], also returning the anomalies that were recovered from.
pub fn evaluate_with_report(expr: &str, ctx: &EvalCtx) -> Evaluation {
    let Some(body) = expr.strip_prefix('=') else {
        return Evaluation {
            value: util::substitute_field(expr, &ctx.field_value),
            anomalies: Vec::new(),
        };
    };

    let ast = parse(body);
    let mut ev = Evaluator::new(ctx);
    let value = ev.value(&ast);
    for anomaly in &ev.anomalies {
        debug!("formula {expr:?}: {anomaly}");
    }
    Evaluation {
        value,
        anomalies: ev.anomalies,
    }
}

impl Expr {
    /// Evaluates an already parsed formula.
    pub fn eval(&self, ctx: &EvalCtx) -> Evaluation {
        let mut ev = Evaluator::new(ctx);
        let value = ev.value(self);
        Evaluation {
            value,
            anomalies: ev.anomalies,
        }
    }
}

pub(crate) struct Evaluator<'a> {
    ctx: &'a EvalCtx,
    anomalies: Vec<Anomaly>,
}

impl<'a> Evaluator<'a> {
    fn new(ctx: &'a EvalCtx) -> Self {
        Evaluator {
            ctx,
            anomalies: Vec::new(),
        }
    }

    /// Reduces an expression to its string value.
    pub(crate) fn value(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Str(s) => s.clone(),
            Expr::Number(raw) => raw.clone(),
            Expr::Field => self.ctx.field_value.clone(),
            Expr::Now => self.ctx.now_millis.to_string(),
            Expr::Concat(parts) => {
                let values: Vec<String> = parts.iter().map(|p| self.value(p)).collect();
                string::concat(values)
            }
            Expr::Add(left, right) => {
                let l = self.value(left);
                let r = self.value(right);
                match arithmetic::add(&l, &r) {
                    Ok(sum) => sum,
                    Err(anomaly) => {
                        self.anomalies.push(anomaly);
                        string::concat([l, r])
                    }
                }
            }
            Expr::Compare { .. } => self.condition(expr).to_string(),
            Expr::If {
                cond,
                then,
                otherwise,
            } => branching::if_eval(self, cond, then, otherwise),
            Expr::Invalid { raw, error } => {
                self.anomalies.push(Anomaly::Malformed {
                    fragment: raw.clone(),
                    error: error.clone(),
                });
                util::substitute_tokens(raw, self.ctx)
            }
        }
    }

    /// Reduces an expression used as an `if` condition.
    ///
    /// Only comparisons can be true.
    pub(crate) fn condition(&mut self, expr: &Expr) -> bool {
        match expr {
            Expr::Compare { op, left, right } => {
                let l = self.value(left);
                let r = self.value(right);
                let (result, anomaly) = comparison::compare(*op, &l, &r);
                self.anomalies.extend(anomaly);
                result
            }
            Expr::Invalid { .. } => {
                self.value(expr);
                false
            }
            _ => {
                self.anomalies.push(Anomaly::NonComparisonCondition);
                false
            }
        }
    }
}
