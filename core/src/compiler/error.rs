//! Bytecode compilation errors.

use alloc::string::ToString;

use crate::api::{Diagnostic, Severity};
use crate::parser::Span;
use crate::{String, Vec};

/// Errors that can occur during bytecode compilation.
///
/// The only failure is running out of memory while growing the output. A
/// failed compilation yields no program at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    OutOfMemory,
}

impl CompileError {
    pub fn code(&self) -> &'static str {
        match self {
            CompileError::OutOfMemory => "C001",
        }
    }

    /// Convert to a Diagnostic for API boundary.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic {
            severity: Severity::Error,
            message: String::from(match self {
                CompileError::OutOfMemory => "out of memory while emitting bytecode",
            }),
            span: Span::new(0, 0),
            related: Vec::new(),
            help: None,
            code: Some(self.code().to_string()),
        }
    }
}

impl core::fmt::Display for CompileError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CompileError::OutOfMemory => write!(f, "Out of memory while emitting bytecode"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CompileError {}
