//! Reckon - integer arithmetic expressions, three ways
//!
//! # Overview
//!
//! Reckon parses arithmetic over named integer parameters and evaluates it
//! with one of three equivalent strategies:
//!
//! - walking the tree as parsed,
//! - walking the tree after algebraic simplification,
//! - running compiled bytecode on a small stack machine.
//!
//! Arithmetic is 64-bit and wraps on overflow. Division truncates toward
//! zero; a literal zero divisor is rejected at parse time and a divisor that
//! evaluates to zero is reported as a runtime error.
//!
//! # Quick Start
//!
//! ```
//! use reckon::{CompilationOptions, ExecutionStrategy, compile_expression};
//!
//! let expr = compile_expression("(x + 1) * y", &["x", "y"], &CompilationOptions::default())?;
//! assert_eq!(expr.run(&[6, 6], ExecutionStrategy::Bytecode)?, 42);
//! # Ok::<(), reckon::Error>(())
//! ```
//!
//! # Lower-level pipeline
//!
//! Each stage is also available on its own:
//!
//! ```
//! use reckon::{compile, evaluate_ast, evaluate_bytecode, format_ast, optimize, parse};
//!
//! let mut ast = parse("x - x + 2 * 3", &["x"]).unwrap();
//! assert_eq!(evaluate_ast(&ast, &[5]).unwrap(), 6);
//!
//! optimize(&mut ast);
//! assert_eq!(format_ast(&ast, &["x"]), "6");
//!
//! let program = compile(&ast).unwrap();
//! assert_eq!(evaluate_bytecode(&program, &[5]).unwrap(), 6);
//! ```
//!
//! # Errors
//!
//! Parse errors carry the offending source range. They can be rendered as
//! plain text with [`render_diagnostic`], or with colors and labels through
//! the [`render_error`] family once converted to [`Error`].

mod error_renderer;

// Re-export public API from reckon_core
pub use reckon_core::api::{
    CompilationOptions, CompiledExpression, Diagnostic, Error, ExecutionStrategy, RelatedInfo,
    Severity, compile_expression,
};

// Re-export the individual pipeline stages
pub use reckon_core::ast::{self, Ast, AstNode, NodeKind, format_ast};
pub use reckon_core::compiler::{CompileError, compile};
pub use reckon_core::diagnostics::render_diagnostic;
pub use reckon_core::evaluator::{ExecutionError, evaluate_ast};
pub use reckon_core::optimizer::optimize;
pub use reckon_core::parser::{
    DEFAULT_MAX_DEPTH, ParseError, ParseErrorKind, Span, parse, parse_with_max_depth,
};
pub use reckon_core::vm::{Program, evaluate_bytecode, format_bytecode};

pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};
