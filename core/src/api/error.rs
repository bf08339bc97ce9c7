//! Public error types for the Reckon API.
//!
//! Internal errors are converted to these types at API boundaries.

use core::fmt;

use crate::compiler::CompileError;
use crate::evaluator::ExecutionError;
use crate::parser::{ParseError, Span};
use crate::{String, Vec, vec};

/// Public error type for all Reckon operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid API usage (e.g., wrong number of arguments).
    Api(String),

    /// The expression was rejected while parsing.
    ///
    /// `source` is the text the diagnostics' spans point into.
    Compilation {
        diagnostics: Vec<Diagnostic>,
        source: String,
    },

    /// Evaluation failed (division by an argument-dependent zero).
    Runtime {
        diagnostic: Diagnostic,
        source: String,
    },

    /// A buffer could not be allocated.
    ResourceExceeded(String),
}

impl Error {
    /// Attach `source` to a runtime error that does not carry one yet.
    pub fn with_source(self, text: &str) -> Self {
        match self {
            Error::Runtime { diagnostic, source } if source.is_empty() => Error::Runtime {
                diagnostic,
                source: String::from(text),
            },
            other => other,
        }
    }

    /// Source text the error's spans refer to, if any.
    pub fn source_text(&self) -> Option<&str> {
        match self {
            Error::Compilation { source, .. } | Error::Runtime { source, .. } => Some(source),
            Error::Api(_) | Error::ResourceExceeded(_) => None,
        }
    }

    /// Diagnostics carried by the error, in report order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Error::Compilation { diagnostics, .. } => diagnostics,
            Error::Runtime { diagnostic, .. } => core::slice::from_ref(diagnostic),
            Error::Api(_) | Error::ResourceExceeded(_) => &[],
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Api(msg) => write!(f, "API error: {}", msg),
            Error::Compilation { diagnostics, .. } => {
                let error_count = diagnostics
                    .iter()
                    .filter(|d| d.severity == Severity::Error)
                    .count();
                write!(f, "Compilation failed with {} error(s)", error_count)
            }
            Error::Runtime { diagnostic, .. } => write!(f, "Runtime error: {}", diagnostic.message),
            Error::ResourceExceeded(msg) => write!(f, "Resource limit exceeded: {}", msg),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// A diagnostic message with source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Severity level (error, warning, info).
    pub severity: Severity,

    /// Primary diagnostic message.
    pub message: String,

    /// Source location of the primary issue. Empty when the error has no
    /// source position.
    pub span: Span,

    /// Related locations that provide additional context.
    pub related: Vec<RelatedInfo>,

    /// Optional help text suggesting how to fix the issue.
    pub help: Option<String>,

    /// Optional error code (e.g., "P001") for documentation lookup.
    pub code: Option<String>,
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Error - compilation cannot succeed.
    Error,
    /// Warning - suspicious code that might be wrong.
    Warning,
    /// Info - informational message.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Related information for a diagnostic (e.g., "opened here").
#[derive(Debug, Clone, PartialEq)]
pub struct RelatedInfo {
    /// Source location of the related information.
    pub span: Span,

    /// Message explaining the relevance.
    pub message: String,
}

// ============================================================================
// Conversion from internal errors
// ============================================================================

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Compilation {
            diagnostics: vec![err.to_diagnostic()],
            source: err.source,
        }
    }
}

impl From<CompileError> for Error {
    fn from(err: CompileError) -> Self {
        match err {
            CompileError::OutOfMemory => Error::ResourceExceeded(err.to_diagnostic().message),
        }
    }
}

impl From<ExecutionError> for Error {
    fn from(err: ExecutionError) -> Self {
        match err {
            ExecutionError::ArgumentCount { .. } => Error::Api(err.to_diagnostic().message),
            ExecutionError::OutOfMemory => Error::ResourceExceeded(err.to_diagnostic().message),
            ExecutionError::DivisionByZero { .. } => Error::Runtime {
                diagnostic: err.to_diagnostic(),
                source: String::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_parse_error_keeps_source() {
        let err = Error::from(parse("1 / 0", &[]).unwrap_err());
        assert_eq!(err.source_text(), Some("1 / 0"));
        assert_eq!(err.diagnostics().len(), 1);
        assert_eq!(err.diagnostics()[0].code.as_deref(), Some("P008"));
        assert_eq!(err.diagnostics()[0].span, Span(4..5));
        assert_eq!(err.to_string(), "Compilation failed with 1 error(s)");
    }

    #[test]
    fn test_execution_error_mapping() {
        let err = Error::from(ExecutionError::ArgumentCount {
            expected: 2,
            actual: 1,
        });
        assert_eq!(err, Error::Api(String::from("expected 2 argument(s), got 1")));

        let err = Error::from(ExecutionError::OutOfMemory);
        assert!(matches!(err, Error::ResourceExceeded(_)));

        let err = Error::from(ExecutionError::DivisionByZero {
            span: Some(Span(2..7)),
            offset: None,
        })
        .with_source("x / y");
        assert_eq!(err.source_text(), Some("x / y"));
        assert_eq!(err.diagnostics()[0].span, Span(2..7));
        assert_eq!(err.diagnostics()[0].code.as_deref(), Some("R001"));
    }

    #[test]
    fn test_with_source_keeps_existing_source() {
        let err = Error::from(parse("(", &[]).unwrap_err()).with_source("other");
        assert_eq!(err.source_text(), Some("("));
    }
}
