//! Tree-walking evaluation of an [`Ast`].
//!
//! ## Example
//!
//! ```
//! use reckon_core::{evaluate_ast, parse};
//!
//! let ast = parse("x * (y + 1)", &["x", "y"]).unwrap();
//! assert_eq!(evaluate_ast(&ast, &[6, 6]).unwrap(), 42);
//! ```

mod error;
mod eval;
pub(crate) mod operators;


pub use error::ExecutionError;
pub(crate) use error::check_argument_count;

use crate::ast::Ast;

/// Evaluate `ast` with `args` bound positionally to its parameters.
///
/// Arithmetic wraps on overflow. Dividing by an argument-dependent zero fails
/// with [`ExecutionError::DivisionByZero`] carrying the division's span.
pub fn evaluate_ast(ast: &Ast, args: &[i64]) -> Result<i64, ExecutionError> {
    eval::Evaluator::new(ast, args)?.eval()
}
