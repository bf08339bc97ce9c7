//! Reckon VM Instructions - Word Format
//!
//! A compiled program is a flat sequence of [`Word`]s. The first word holds
//! the maximum stack depth; every instruction after it is one opcode word,
//! and `PushConst`/`PushParam` are followed by one immediate word:
//!
//! ```text
//! ┌─────────────┬────────────┬───────────┬────────────┬─────┬────────┐
//! │ stack depth │ PushParam  │ index     │ PushConst  │ ... │ Return │
//! └─────────────┴────────────┴───────────┴────────────┴─────┴────────┘
//! ```
//!
//! # Stack Discipline
//!
//! Stack effect notation: `[..., left, right] -> [..., result]`. Binary
//! operators combine into the slot that held `left`.

use static_assertions::{assert_eq_size, const_assert_eq};

use crate::parser::BinaryOp;

/// One cell of a compiled program. Also the VM's value type.
pub type Word = i64;

pub const OPCODE_COUNT: usize = 8;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// Stack: [..., a, b] -> [..., a + b]
    Add = 0,
    /// Stack: [..., a, b] -> [..., a - b]
    Sub = 1,
    /// Stack: [..., a, b] -> [..., a * b]
    Mul = 2,
    /// Stack: [..., a, b] -> [..., a / b]
    /// Fails when `b` is zero.
    Div = 3,
    /// Stack: [..., a] -> [..., -a]
    Negate = 4,
    /// Immediate: literal | Stack: [...] -> [..., literal]
    PushConst = 5,
    /// Immediate: parameter index | Stack: [...] -> [..., argument]
    PushParam = 6,
    /// Stack: [result] -> []
    Return = 7,
}

const_assert_eq!(Opcode::Return as usize + 1, OPCODE_COUNT);
assert_eq_size!(Word, [u8; 8]);

impl Opcode {
    /// Every opcode, indexed by tag.
    pub const ALL: [Opcode; OPCODE_COUNT] = [
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::Div,
        Opcode::Negate,
        Opcode::PushConst,
        Opcode::PushParam,
        Opcode::Return,
    ];

    pub fn from_word(word: Word) -> Option<Self> {
        usize::try_from(word)
            .ok()
            .and_then(|tag| Self::ALL.get(tag).copied())
    }

    pub fn word(self) -> Word {
        self as Word
    }

    /// Number of immediate words following the opcode.
    pub fn immediates(self) -> usize {
        match self {
            Opcode::PushConst | Opcode::PushParam => 1,
            _ => 0,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Add => "Add",
            Opcode::Sub => "Sub",
            Opcode::Mul => "Mul",
            Opcode::Div => "Div",
            Opcode::Negate => "Negate",
            Opcode::PushConst => "PushConst",
            Opcode::PushParam => "PushParam",
            Opcode::Return => "Return",
        }
    }
}

impl From<BinaryOp> for Opcode {
    fn from(op: BinaryOp) -> Self {
        match op {
            BinaryOp::Add => Opcode::Add,
            BinaryOp::Sub => Opcode::Sub,
            BinaryOp::Mul => Opcode::Mul,
            BinaryOp::Div => Opcode::Div,
        }
    }
}
