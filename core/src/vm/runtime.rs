use crate::evaluator::operators::{eval_binary, eval_negate};
use crate::evaluator::{ExecutionError, check_argument_count};
use crate::parser::BinaryOp;
use crate::vm::Stack;
use crate::vm::instruction_set::{OPCODE_COUNT, Word};
use crate::vm::program::Program;

/// What the dispatch loop does after a handler returns.
enum Flow {
    Continue,
    Return(Word),
}

type Handler = fn(&mut VM<'_>) -> Result<Flow, ExecutionError>;

/// Handlers indexed by opcode tag.
const HANDLERS: [Handler; OPCODE_COUNT] = [
    op_add,
    op_sub,
    op_mul,
    op_div,
    op_negate,
    op_push_const,
    op_push_param,
    op_return,
];

/// Stack machine for one evaluation of a [`Program`].
pub struct VM<'a> {
    code: &'a [Word],
    args: &'a [Word],
    pc: usize,
    stack: Stack<Word>,
}

impl<'a> VM<'a> {
    pub fn new(program: &'a Program, args: &'a [Word]) -> Result<Self, ExecutionError> {
        check_argument_count(program.param_count(), args.len())?;
        let stack = Stack::try_new(program.max_stack_depth())
            .map_err(|_| ExecutionError::OutOfMemory)?;
        Ok(Self {
            code: program.code(),
            args,
            pc: 0,
            stack,
        })
    }

    pub fn run(&mut self) -> Result<Word, ExecutionError> {
        tracing::trace!(
            code_len = self.code.len(),
            stack_size = self.stack.capacity(),
            "Running program"
        );
        loop {
            // Tags come from the compiler, so the index is always in range.
            let handler = HANDLERS[self.code[self.pc] as usize];
            if let Flow::Return(value) = handler(self)? {
                return Ok(value);
            }
        }
    }

    fn binary(&mut self, op: BinaryOp) -> Result<Flow, ExecutionError> {
        let pc = self.pc;
        let right = self.stack.pop();
        let left = self.stack.peek_mut();
        *left = eval_binary(op, *left, right).ok_or(ExecutionError::DivisionByZero {
            span: None,
            offset: Some(pc),
        })?;
        self.pc += 1;
        Ok(Flow::Continue)
    }

    fn immediate(&self) -> Word {
        self.code[self.pc + 1]
    }
}

fn op_add(vm: &mut VM<'_>) -> Result<Flow, ExecutionError> {
    vm.binary(BinaryOp::Add)
}

fn op_sub(vm: &mut VM<'_>) -> Result<Flow, ExecutionError> {
    vm.binary(BinaryOp::Sub)
}

fn op_mul(vm: &mut VM<'_>) -> Result<Flow, ExecutionError> {
    vm.binary(BinaryOp::Mul)
}

fn op_div(vm: &mut VM<'_>) -> Result<Flow, ExecutionError> {
    vm.binary(BinaryOp::Div)
}

fn op_negate(vm: &mut VM<'_>) -> Result<Flow, ExecutionError> {
    let top = vm.stack.peek_mut();
    *top = eval_negate(*top);
    vm.pc += 1;
    Ok(Flow::Continue)
}

fn op_push_const(vm: &mut VM<'_>) -> Result<Flow, ExecutionError> {
    let value = vm.immediate();
    vm.stack.push(value);
    vm.pc += 2;
    Ok(Flow::Continue)
}

fn op_push_param(vm: &mut VM<'_>) -> Result<Flow, ExecutionError> {
    let value = vm.args[vm.immediate() as usize];
    vm.stack.push(value);
    vm.pc += 2;
    Ok(Flow::Continue)
}

fn op_return(vm: &mut VM<'_>) -> Result<Flow, ExecutionError> {
    let value = vm.stack.pop();
    debug_assert!(
        vm.stack.is_empty(),
        "{} values left on the stack at return",
        vm.stack.len()
    );
    Ok(Flow::Return(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec;
    use crate::vm::Opcode;

    fn program(code: &[Word], depth: Word, params: usize) -> Program {
        let mut words = vec![depth];
        words.extend_from_slice(code);
        Program::from_words(words, params)
    }

    fn run(program: &Program, args: &[Word]) -> Result<Word, ExecutionError> {
        VM::new(program, args)?.run()
    }

    #[test]
    fn test_operand_order() {
        // 7 - x
        let program = program(
            &[
                Opcode::PushConst.word(),
                7,
                Opcode::PushParam.word(),
                0,
                Opcode::Sub.word(),
                Opcode::Return.word(),
            ],
            2,
            1,
        );
        assert_eq!(run(&program, &[10]), Ok(-3));
    }

    #[test]
    fn test_division_by_zero_reports_offset() {
        let program = program(
            &[
                Opcode::PushParam.word(),
                0,
                Opcode::PushParam.word(),
                1,
                Opcode::Div.word(),
                Opcode::Return.word(),
            ],
            2,
            2,
        );
        assert_eq!(run(&program, &[9, 3]), Ok(3));
        assert_eq!(
            run(&program, &[9, 0]),
            Err(ExecutionError::DivisionByZero {
                span: None,
                offset: Some(4),
            })
        );
    }

    #[test]
    fn test_negate_in_place() {
        let program = program(
            &[
                Opcode::PushConst.word(),
                i64::MIN,
                Opcode::Negate.word(),
                Opcode::Return.word(),
            ],
            1,
            0,
        );
        assert_eq!(run(&program, &[]), Ok(i64::MIN));
    }

    #[test]
    fn test_argument_count_checked_before_running() {
        let program = program(&[Opcode::PushParam.word(), 0, Opcode::Return.word()], 1, 1);
        assert_eq!(
            run(&program, &[]),
            Err(ExecutionError::ArgumentCount {
                expected: 1,
                actual: 0
            })
        );
    }

    #[test]
    #[should_panic(expected = "values left on the stack")]
    #[cfg(debug_assertions)]
    fn test_return_with_leftover_values_debug() {
        let program = program(
            &[
                Opcode::PushConst.word(),
                1,
                Opcode::PushConst.word(),
                2,
                Opcode::Return.word(),
            ],
            2,
            0,
        );
        let _ = run(&program, &[]);
    }
}
