//! Public API for compiling and running Reckon expressions.
//!
//! [`compile_expression`] runs the whole pipeline once and keeps every
//! intermediate form, so the same expression can be evaluated by any
//! [`ExecutionStrategy`].
//!
//! # Example
//!
//! ```
//! use reckon_core::api::{CompilationOptions, ExecutionStrategy, compile_expression};
//!
//! let expr = compile_expression("x * 2 + y", &["x", "y"], &CompilationOptions::default())?;
//! assert_eq!(expr.run(&[20, 2], ExecutionStrategy::Bytecode)?, 42);
//! assert_eq!(expr.run(&[20, 2], ExecutionStrategy::Tree)?, 42);
//! # Ok::<(), reckon_core::api::Error>(())
//! ```

pub mod error;
pub mod expression;
pub mod options;

pub use error::{Diagnostic, Error, RelatedInfo, Severity};
pub use expression::{CompiledExpression, compile_expression};
pub use options::{CompilationOptions, ExecutionStrategy};
