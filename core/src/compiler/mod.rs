//! Bytecode compiler for Reckon expressions.
//!
//! Turns an [`Ast`] into a [`Program`] for the stack VM in a single
//! post-order pass:
//!
//! - binary nodes emit left, right, then the operator;
//! - `Negate` emits its operand, then `Negate`;
//! - literals and parameters push one value each;
//! - the stream ends with `Return`.
//!
//! The maximum stack depth is computed while emitting and stored in the
//! program header.

mod bytecode;
mod error;


pub use bytecode::BytecodeCompiler;
pub use error::CompileError;

use crate::ast::Ast;
use crate::vm::Program;

/// Compile `ast` into a program.
pub fn compile(ast: &Ast) -> Result<Program, CompileError> {
    BytecodeCompiler::compile(ast)
}
