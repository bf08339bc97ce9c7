use alloc::string::ToString;

use crate::api::{Diagnostic, RelatedInfo, Severity};
use crate::parser::Span;
use crate::{String, Vec, format, vec};

/// Parser error with the source it was raised against.
///
/// The parser is fail-fast: the first violation in left-to-right scan order
/// is the only one reported.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub source: String,
    /// Offending source range. Empty (`0..0`) for argument-name errors,
    /// which point at a parameter index instead.
    pub span: Span,
}

/// Specific kinds of parse errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A byte that cannot start any token.
    IllegalCharacter { found: char },
    /// A well-formed token in a position where the grammar does not allow it.
    IllegalToken {
        expected: &'static str,
        found: &'static str,
    },
    /// A parenthesized expression that is not closed.
    ExpectedCloseParen { open: Span, found: &'static str },
    /// A parameter name that is not a valid identifier.
    IllegalArgumentName { index: usize, name: String },
    /// A parameter name listed more than once.
    DuplicatedArgumentName {
        index: usize,
        first: usize,
        name: String,
    },
    /// An identifier that is not in the parameter list.
    UndefinedVariable { name: String },
    /// Integer literal or literal negation outside the `i64` range.
    ValueOutOfRange,
    /// Division by a divisor that is literally zero.
    DivisionByZero,
    /// A growable buffer could not be extended.
    OutOfMemory,
    /// Parenthesis nesting deeper than the configured limit.
    MaxDepthExceeded { max_depth: usize },
}

impl ParseErrorKind {
    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            ParseErrorKind::IllegalCharacter { .. } => "P001",
            ParseErrorKind::IllegalToken { .. } => "P002",
            ParseErrorKind::ExpectedCloseParen { .. } => "P003",
            ParseErrorKind::IllegalArgumentName { .. } => "P004",
            ParseErrorKind::DuplicatedArgumentName { .. } => "P005",
            ParseErrorKind::UndefinedVariable { .. } => "P006",
            ParseErrorKind::ValueOutOfRange => "P007",
            ParseErrorKind::DivisionByZero => "P008",
            ParseErrorKind::OutOfMemory => "P009",
            ParseErrorKind::MaxDepthExceeded { .. } => "P010",
        }
    }

    /// Name of the violated rule.
    pub fn category(&self) -> &'static str {
        match self {
            ParseErrorKind::IllegalCharacter { .. } => "illegal character",
            ParseErrorKind::IllegalToken { .. } => "illegal token",
            ParseErrorKind::ExpectedCloseParen { .. } => "expected close paren",
            ParseErrorKind::IllegalArgumentName { .. } => "illegal argument name",
            ParseErrorKind::DuplicatedArgumentName { .. } => "duplicated argument name",
            ParseErrorKind::UndefinedVariable { .. } => "undefined variable",
            ParseErrorKind::ValueOutOfRange => "value out of range",
            ParseErrorKind::DivisionByZero => "division by zero",
            ParseErrorKind::OutOfMemory => "out of memory",
            ParseErrorKind::MaxDepthExceeded { .. } => "nesting too deep",
        }
    }

    /// Parameter index for argument-name errors.
    pub fn argument_index(&self) -> Option<usize> {
        match self {
            ParseErrorKind::IllegalArgumentName { index, .. }
            | ParseErrorKind::DuplicatedArgumentName { index, .. } => Some(*index),
            _ => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ParseErrorKind::IllegalCharacter { found } => {
                format!("illegal character {:?}", found)
            }
            ParseErrorKind::IllegalToken { expected, found } => {
                format!("expected {}, found {}", expected, found)
            }
            ParseErrorKind::ExpectedCloseParen { found, .. } => {
                format!("expected ')', found {}", found)
            }
            ParseErrorKind::IllegalArgumentName { index, name } => {
                format!("argument #{} has an illegal name {:?}", index, name)
            }
            ParseErrorKind::DuplicatedArgumentName { index, first, name } => format!(
                "argument #{} is named {:?}, which is already used by argument #{}",
                index, name, first
            ),
            ParseErrorKind::UndefinedVariable { name } => {
                format!("undefined variable `{}`", name)
            }
            ParseErrorKind::ValueOutOfRange => {
                format!("value out of range (limits are {} to {})", i64::MIN, i64::MAX)
            }
            ParseErrorKind::DivisionByZero => "division by zero".to_string(),
            ParseErrorKind::OutOfMemory => "out of memory".to_string(),
            ParseErrorKind::MaxDepthExceeded { max_depth } => format!(
                "parentheses nest deeper than the maximum of {} levels",
                max_depth
            ),
        }
    }
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, source: String, span: Span) -> Self {
        Self { kind, source, span }
    }

    /// Convert to a Diagnostic for API boundary
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (related, help) = match &self.kind {
            ParseErrorKind::ExpectedCloseParen { open, .. } => (
                vec![RelatedInfo {
                    span: open.clone(),
                    message: "unclosed '(' opened here".to_string(),
                }],
                Some("add the missing ')'".to_string()),
            ),
            ParseErrorKind::UndefinedVariable { .. } => (
                Vec::new(),
                Some("variables must be declared as parameters".to_string()),
            ),
            ParseErrorKind::IllegalArgumentName { .. } => (
                Vec::new(),
                Some("names must match [A-Za-z_][A-Za-z0-9_]*".to_string()),
            ),
            ParseErrorKind::MaxDepthExceeded { .. } => (
                Vec::new(),
                Some("reduce nesting or simplify the expression".to_string()),
            ),
            _ => (Vec::new(), None),
        };

        Diagnostic {
            severity: Severity::Error,
            message: self.kind.message(),
            span: self.span.clone(),
            related,
            help,
            code: Some(self.kind.code().to_string()),
        }
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}: {} [{}]",
            self.kind.category(),
            self.kind.message(),
            self.kind.code()
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}
