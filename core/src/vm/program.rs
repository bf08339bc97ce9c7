use core::fmt;

use crate::vm::instruction_set::{Opcode, Word};
use crate::{String, ToString, Vec};

/// A compiled expression: one header word with the maximum stack depth,
/// followed by the instruction stream.
///
/// Produced only by the compiler, which guarantees the header matches the
/// stack usage of the instructions.
#[derive(Clone, PartialEq, Eq)]
pub struct Program {
    words: Vec<Word>,
    param_count: usize,
}

impl Program {
    pub(crate) fn from_words(words: Vec<Word>, param_count: usize) -> Self {
        debug_assert!(!words.is_empty(), "program without a header");
        Self { words, param_count }
    }

    /// Number of value slots the VM must preallocate.
    pub fn max_stack_depth(&self) -> usize {
        self.words
            .first()
            .and_then(|&depth| usize::try_from(depth).ok())
            .unwrap_or(0)
    }

    /// Instruction stream, without the header.
    pub fn code(&self) -> &[Word] {
        self.words.get(1..).unwrap_or(&[])
    }

    /// Raw layout: header word followed by the code.
    pub fn as_words(&self) -> &[Word] {
        &self.words
    }

    pub fn param_count(&self) -> usize {
        self.param_count
    }

    /// Disassembly with parameter references resolved against `names`.
    pub fn display<'a>(&'a self, names: &'a [&'a str]) -> ProgramDisplay<'a> {
        ProgramDisplay {
            program: self,
            names,
        }
    }
}

/// One line per instruction: word offset into the code, mnemonic and
/// immediate. `PushParam` shows the parameter name when one is known.
pub struct ProgramDisplay<'a> {
    program: &'a Program,
    names: &'a [&'a str],
}

impl fmt::Display for ProgramDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "stack size: {}", self.program.max_stack_depth())?;

        let code = self.program.code();
        let mut offset = 0;
        while offset < code.len() {
            let word = code[offset];
            let Some(opcode) = Opcode::from_word(word) else {
                writeln!(f, "{:04}  <invalid opcode {}>", offset, word)?;
                offset += 1;
                continue;
            };

            write!(f, "{:04}  {}", offset, opcode.mnemonic())?;
            let immediate = code.get(offset + 1).copied();
            match (opcode, immediate) {
                (Opcode::PushConst, Some(value)) => write!(f, " {}", value)?,
                (Opcode::PushParam, Some(index)) => {
                    let name = usize::try_from(index)
                        .ok()
                        .and_then(|index| self.names.get(index));
                    match name {
                        Some(name) => write!(f, " {}", name)?,
                        None => write!(f, " ${}", index)?,
                    }
                }
                (Opcode::PushConst | Opcode::PushParam, None) => f.write_str(" <truncated>")?,
                _ => {}
            }
            writeln!(f)?;
            offset += 1 + opcode.immediates();
        }
        Ok(())
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Program (params: {})", self.param_count)?;
        fmt::Display::fmt(&self.display(&[]), f)
    }
}

/// Renders `program` as an opcode-per-line listing.
pub fn format_bytecode(program: &Program, names: &[&str]) -> String {
    program.display(names).to_string()
}
