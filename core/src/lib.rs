#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

extern crate alloc;

// Re-export for convenience so other modules don't need alloc:: prefix
#[allow(unused_imports)]
pub(crate) use alloc::{boxed::Box, format, string::String, string::ToString, vec, vec::Vec};

pub mod api;
pub mod ast;
pub mod compiler;
pub mod diagnostics;
pub mod evaluator;
pub mod optimizer;
pub mod parser;
pub mod vm;

pub use ast::{Ast, AstNode, NodeKind, format_ast};
pub use compiler::compile;
pub use diagnostics::render_diagnostic;
pub use evaluator::evaluate_ast;
pub use optimizer::optimize;
pub use parser::parse;
pub use vm::{Program, evaluate_bytecode, format_bytecode};
