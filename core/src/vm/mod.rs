//! Stack VM executing compiled [`Program`]s.

mod instruction_set;
mod program;
mod runtime;
mod stack;

pub use instruction_set::{OPCODE_COUNT, Opcode, Word};
pub use program::{Program, ProgramDisplay, format_bytecode};
pub use runtime::VM;

pub(crate) use stack::Stack;

use crate::evaluator::ExecutionError;

/// Run `program` with `args` bound positionally to its parameters.
pub fn evaluate_bytecode(program: &Program, args: &[i64]) -> Result<i64, ExecutionError> {
    VM::new(program, args)?.run()
}
