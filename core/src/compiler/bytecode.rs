use crate::Vec;
use crate::ast::{Ast, NodeKind};
use crate::compiler::CompileError;
use crate::vm::{Opcode, Program, Word};

/// Bytecode compiler.
///
/// Emits the tree in post-order, which is exactly stack-machine order, and
/// tracks the abstract stack depth so the VM can preallocate its stack.
pub struct BytecodeCompiler {
    /// Header word followed by the instruction stream.
    words: Vec<Word>,

    /// Values on the VM stack at the current emission point.
    current_stack_depth: usize,

    /// Highest value of `current_stack_depth` seen so far.
    max_stack_size: usize,
}

impl Default for BytecodeCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl BytecodeCompiler {
    pub fn new() -> Self {
        Self {
            words: Vec::new(),
            current_stack_depth: 0,
            max_stack_size: 0,
        }
    }

    /// Convenience method to compile a tree in one call.
    pub fn compile(ast: &Ast) -> Result<Program, CompileError> {
        let mut compiler = Self::new();
        // Header; patched in `finalize`.
        compiler.emit_word(0)?;
        for id in ast.post_order() {
            compiler.emit_node(ast.node(id).kind)?;
        }
        compiler.emit(Opcode::Return)?;
        compiler.pop_stack();
        Ok(compiler.finalize(ast.param_count()))
    }

    fn emit_node(&mut self, kind: NodeKind) -> Result<(), CompileError> {
        match kind {
            NodeKind::Binary { op, .. } => {
                self.emit(Opcode::from(op))?;
                self.pop_stack();
            }
            NodeKind::Negate { .. } => self.emit(Opcode::Negate)?,
            NodeKind::IntLiteral(value) => {
                self.emit(Opcode::PushConst)?;
                self.emit_word(value)?;
                self.push_stack();
            }
            NodeKind::ParamRef(index) => {
                self.emit(Opcode::PushParam)?;
                self.emit_word(index as Word)?;
                self.push_stack();
            }
        }
        Ok(())
    }

    fn finalize(mut self, param_count: usize) -> Program {
        debug_assert_eq!(self.current_stack_depth, 0, "Unbalanced stack");
        self.words[0] = self.max_stack_size as Word;
        tracing::debug!(
            words = self.words.len(),
            max_stack_size = self.max_stack_size,
            "Compiled program"
        );
        Program::from_words(self.words, param_count)
    }

    /// Push a value to the stack (increases depth by 1).
    fn push_stack(&mut self) {
        self.current_stack_depth += 1;
        if self.current_stack_depth > self.max_stack_size {
            self.max_stack_size = self.current_stack_depth;
        }
    }

    /// Pop a value from the stack (decreases depth by 1).
    fn pop_stack(&mut self) {
        debug_assert!(self.current_stack_depth > 0, "Stack underflow");
        self.current_stack_depth -= 1;
    }

    fn emit(&mut self, opcode: Opcode) -> Result<(), CompileError> {
        self.emit_word(opcode.word())
    }

    fn emit_word(&mut self, word: Word) -> Result<(), CompileError> {
        self.words
            .try_reserve(1)
            .map_err(|_| CompileError::OutOfMemory)?;
        self.words.push(word);
        Ok(())
    }
}
