//! Column formatting expression evaluator.
//!
//! # Overview
//!
//! Values in a column formatting document are either literal templates or
//! formulas. A formula starts with `=` and is written in a small language:
//! string literals, `@currentField`, `@now`, `+` (concatenation, or integer
//! addition for exactly two integer operands), the comparisons `==`, `<=`,
//! `>=`, and nested `if(cond, then, else)`.
//!
//! Evaluation is total. Malformed fragments evaluate to their own source text
//! and are reported as [`Anomaly`] values instead of errors.
//!
//! # Example
//!
//! ```
//! use column_format_expression::{evaluate, EvalCtx};
//!
//! let ctx = EvalCtx::new("Blocked", 0);
//! let expr = "=if(@currentField == 'Done', 'yes', if(@currentField == 'Blocked', 'stop', 'no'))";
//! assert_eq!(evaluate(expr, &ctx), "stop");
//!
//! // Literal templates only substitute the field token.
//! assert_eq!(evaluate("Status: @currentField", &ctx), "Status: Blocked");
//! ```

pub mod error;
pub mod eval_ctx;
pub mod evaluate;
pub mod lexer;
pub mod operators;
pub mod parser;
pub mod types;
pub mod util;

pub use error::{Anomaly, ExprError};
pub use eval_ctx::EvalCtx;
pub use evaluate::{evaluate, evaluate_with_report, Evaluation};
pub use parser::parse;
pub use types::{CompareOp, Expr, Token, TokenKind};

/// Token that stands for the value of the current row's field.
pub const FIELD_TOKEN: &str = "@currentField";

/// Token that stands for the evaluation instant in epoch milliseconds.
pub const NOW_TOKEN: &str = "@now";
