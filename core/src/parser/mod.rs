//! Scanner and recursive-descent parser producing an [`Ast`](crate::ast::Ast).

mod error;
#[allow(clippy::module_inception)]
mod parser;
pub(crate) mod scanner;
mod syntax;

pub use error::{ParseError, ParseErrorKind};
pub use parser::{DEFAULT_MAX_DEPTH, parse, parse_with_max_depth};
pub use syntax::{BinaryOp, Span};
