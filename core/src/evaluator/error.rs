//! Runtime evaluation errors.
//!
//! Shared by the tree evaluator and the bytecode VM. Parse-time checks already
//! reject literal zero divisors, so a division by zero here always comes from
//! a divisor that depends on an argument.

use alloc::string::ToString;
use core::fmt;

use crate::api::{Diagnostic, Severity};
use crate::parser::Span;
use crate::{String, Vec, format};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// A divisor evaluated to zero.
    ///
    /// The tree evaluator reports the division's source span. The VM has no
    /// source positions and reports the word offset of the `Div` instruction.
    DivisionByZero {
        span: Option<Span>,
        offset: Option<usize>,
    },

    /// The number of supplied arguments does not match the parameter list.
    ArgumentCount { expected: usize, actual: usize },

    /// A working buffer could not be allocated.
    OutOfMemory,
}

impl ExecutionError {
    pub fn code(&self) -> &'static str {
        match self {
            ExecutionError::DivisionByZero { .. } => "R001",
            ExecutionError::ArgumentCount { .. } => "R002",
            ExecutionError::OutOfMemory => "R003",
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let span = match self {
            ExecutionError::DivisionByZero {
                span: Some(span), ..
            } => span.clone(),
            _ => Span::default(),
        };
        Diagnostic {
            severity: Severity::Error,
            message: self.message(),
            span,
            related: Vec::new(),
            help: None,
            code: Some(self.code().to_string()),
        }
    }

    fn message(&self) -> String {
        match self {
            ExecutionError::DivisionByZero { offset: Some(at), .. } => {
                format!("division by zero (instruction at offset {})", at)
            }
            ExecutionError::DivisionByZero { .. } => "division by zero".to_string(),
            ExecutionError::ArgumentCount { expected, actual } => format!(
                "expected {} argument(s), got {}",
                expected, actual
            ),
            ExecutionError::OutOfMemory => "out of memory".to_string(),
        }
    }
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())?;
        if let ExecutionError::DivisionByZero {
            span: Some(span), ..
        } = self
        {
            write!(f, " at {}..{}", span.0.start, span.0.end)?;
        }
        Ok(())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ExecutionError {}

/// Fails unless exactly `expected` arguments were supplied.
pub(crate) fn check_argument_count(expected: usize, actual: usize) -> Result<(), ExecutionError> {
    if expected == actual {
        Ok(())
    } else {
        Err(ExecutionError::ArgumentCount { expected, actual })
    }
}
